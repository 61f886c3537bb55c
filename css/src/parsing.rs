use super::*;
use nom::branch::alt;
use nom::bytes::complete::{is_not, tag, take_until, take_while, take_while1};
use nom::character::complete::{alpha1, char, digit0, digit1, multispace1, one_of};
use nom::combinator::{all_consuming, map, map_opt, map_res, opt, recognize, value};
use nom::multi::{many0, separated_list0, separated_list1};
use nom::sequence::{delimited, pair, preceded, terminated, tuple};
use nom::IResult;
use tracing::trace;

/// Parses a single property value such as `red`, `300px` or `rgb(1, 2, 3)`.
/// Returns `None` unless the whole input is a valid value.
pub fn parse_value(input: &str) -> Option<Value> {
    all_consuming(delimited(ws, expr, ws))(input)
        .ok()
        .map(|(_, v)| v)
}

/// Parses the text of a `style` attribute. Declarations that fail to parse are
/// skipped.
pub fn declaration_list(input: &str) -> Vec<Declaration> {
    let segments: IResult<&str, Vec<&str>> =
        separated_list0(char(';'), take_while(|c| c != ';'))(input);
    let segments = match segments {
        Ok((_, segments)) => segments,
        Err(_) => return vec![],
    };
    segments
        .into_iter()
        .filter(|s| !s.trim().is_empty())
        .filter_map(|s| {
            let decl = declaration(s);
            if decl.is_none() {
                trace!(declaration = s, "Skipping invalid declaration");
            }
            decl
        })
        .collect()
}

/// Parse single declaration
fn declaration(input: &str) -> Option<Declaration> {
    let head: IResult<&str, (_, String, _, _, _)> =
        tuple((ws, property, ws, char(':'), ws))(input);
    let (rest, (_, name, _, _, _)) = head.ok()?;
    Declaration::parse(&name, rest)
}

/// Parse property
fn property(input: &str) -> IResult<&str, String> {
    alt((variable, ident))(input)
}

/// Parse expression
fn expr(input: &str) -> IResult<&str, Value> {
    let (input, mut values) = separated_list1(multispace1, term)(input)?;
    let value = if values.len() == 1 {
        values.remove(0)
    } else {
        Value::Multiple(values)
    };
    Ok((input, value))
}

/// Parse a term
fn term(input: &str) -> IResult<&str, Value> {
    alt((
        function,
        hexcolor,
        percentage,
        dimension,
        number,
        map(string, Value::String),
        keyword,
    ))(input)
}

fn number_raw(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(pair(
            opt(one_of("+-")),
            alt((recognize(tuple((digit0, char('.'), digit1))), digit1)),
        )),
        str::parse::<f64>,
    )(input)
}

fn number(input: &str) -> IResult<&str, Value> {
    map(number_raw, Value::Number)(input)
}

fn percentage(input: &str) -> IResult<&str, Value> {
    map(terminated(number_raw, char('%')), Value::Percentage)(input)
}

fn dimension(input: &str) -> IResult<&str, Value> {
    map_opt(pair(number_raw, alpha1), |(n, unit)| {
        Unit::from_keyword(unit).map(|unit| Value::Length(n, unit))
    })(input)
}

/// Keywords that name a color become [`Value::Color`]
fn keyword(input: &str) -> IResult<&str, Value> {
    map(ident, |kw| match named_color(&kw) {
        Some(col) => Value::Color(col),
        None => Value::Keyword(kw.to_ascii_lowercase()),
    })(input)
}

fn hexcolor(input: &str) -> IResult<&str, Value> {
    map_opt(
        preceded(char('#'), take_while1(|c: char| c.is_ascii_hexdigit())),
        hex_to_color,
    )(input)
}

fn hex_to_color(hex: &str) -> Option<Value> {
    let digits: Vec<u8> = hex
        .chars()
        .map(|c| c.to_digit(16).map(|d| d as u8))
        .collect::<Option<_>>()?;
    let channels: Vec<u8> = match digits.len() {
        3 | 4 => digits.iter().map(|d| d * 17).collect(),
        6 | 8 => digits.chunks(2).map(|p| p[0] * 16 + p[1]).collect(),
        _ => return None,
    };
    let a = channels.get(3).copied().unwrap_or(255);
    Some(Value::Color(ColorValue::rgba(
        channels[0],
        channels[1],
        channels[2],
        a,
    )))
}

fn function(input: &str) -> IResult<&str, Value> {
    let (input, (name, _, _, args, _, _)) = tuple((
        ident,
        char('('),
        ws,
        separated_list0(argument_separator, term),
        ws,
        char(')'),
    ))(input)?;
    Ok((
        input,
        function_to_value(FunctionValue(name.to_ascii_lowercase(), args)),
    ))
}

fn argument_separator(input: &str) -> IResult<&str, ()> {
    alt((
        value((), tuple((ws, one_of(",/"), ws))),
        value((), multispace1),
    ))(input)
}

/// Takes a CSS function call and returns a Value. If the function is implemented,
/// the proper value will be returned. Otherwise, it will be returned as a Value::Function
fn function_to_value(func: FunctionValue) -> Value {
    match func.0.as_str() {
        "rgb" | "rgba" => match rgb_arguments(&func.1) {
            Some(col) => Value::Color(col),
            None => Value::Function(func),
        },
        _ => Value::Function(func),
    }
}

fn rgb_arguments(args: &[Value]) -> Option<ColorValue> {
    if !(3..=4).contains(&args.len()) {
        return None;
    }
    let channel = |v: &Value| match v {
        Value::Number(n) => Some(n.clamp(0.0, 255.0).round() as u8),
        Value::Percentage(p) => Some((p.clamp(0.0, 100.0) * 2.55).round() as u8),
        _ => None,
    };
    let alpha = match args.get(3) {
        None => 255,
        Some(Value::Number(n)) => (n.clamp(0.0, 1.0) * 255.0).round() as u8,
        Some(Value::Percentage(p)) => (p.clamp(0.0, 100.0) * 2.55).round() as u8,
        Some(_) => return None,
    };
    Some(ColorValue::rgba(
        channel(&args[0])?,
        channel(&args[1])?,
        channel(&args[2])?,
        alpha,
    ))
}

/// Parse quoted string
fn string(input: &str) -> IResult<&str, String> {
    /// Parse double-quoted string
    fn string1(input: &str) -> IResult<&str, String> {
        let (input, (_, content, _)) = tuple((
            char('"'),
            many0(alt((is_not("\n\r\\\""), alt((tag("\\n"), tag("\\r")))))),
            char('"'),
        ))(input)?;
        Ok((input, content.join("")))
    }
    /// Parse single-quoted string
    fn string2(input: &str) -> IResult<&str, String> {
        let (input, (_, content, _)) = tuple((
            char('\''),
            many0(alt((is_not("\n\r\\'"), alt((tag("\\n"), tag("\\r")))))),
            char('\''),
        ))(input)?;
        Ok((input, content.join("")))
    }
    alt((string1, string2))(input)
}

/// Whitespace and comments
fn ws(input: &str) -> IResult<&str, ()> {
    value(
        (),
        many0(alt((
            delimited(tag("/*"), take_until("*/"), tag("*/")),
            multispace1,
        ))),
    )(input)
}

/// Parse ident
fn ident(input: &str) -> IResult<&str, String> {
    map(
        recognize(tuple((
            opt(char('-')),
            alt((alpha1, tag("_"))),
            take_while(|c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
        ))),
        str::to_string,
    )(input)
}

/// Parse custom property name (`--name`)
fn variable(input: &str) -> IResult<&str, String> {
    map(
        recognize(pair(
            tag("--"),
            take_while1(|c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
        )),
        str::to_string,
    )(input)
}

#[cfg(test)]
#[test]
fn test_term() {
    assert_eq!(term("12.5px"), Ok(("", Value::Length(12.5, Unit::Px))));
    assert_eq!(term("50%"), Ok(("", Value::Percentage(50.0))));
    assert_eq!(term("-3"), Ok(("", Value::Number(-3.0))));
    assert_eq!(
        term("border-box"),
        Ok(("", Value::Keyword("border-box".to_string())))
    );
    assert_eq!(term("'a b'"), Ok(("", Value::String("a b".to_string()))));
}

#[cfg(test)]
#[test]
fn test_hexcolor() {
    assert_eq!(
        hexcolor("#fff"),
        Ok(("", Value::Color(ColorValue::rgb(255, 255, 255))))
    );
    assert_eq!(
        hexcolor("#112233"),
        Ok(("", Value::Color(ColorValue::rgb(0x11, 0x22, 0x33))))
    );
    assert_eq!(
        hexcolor("#00000000"),
        Ok(("", Value::Color(ColorValue::rgba(0, 0, 0, 0))))
    );
    assert!(hexcolor("#12345").is_err());
}

#[cfg(test)]
#[test]
fn test_function() {
    let (rest, val) = function("rgb(197,93,161)").unwrap();
    assert_eq!(rest, "");
    assert_eq!(val, Value::Color(ColorValue::rgb(197, 93, 161)));

    let (_, val) = function("rgba(0, 0, 255, 0.5)").unwrap();
    assert_eq!(val, Value::Color(ColorValue::rgba(0, 0, 255, 128)));

    let (_, val) = function("translate(10px 20px)").unwrap();
    assert_eq!(
        val,
        Value::Function(FunctionValue(
            "translate".to_string(),
            vec![Value::Length(10.0, Unit::Px), Value::Length(20.0, Unit::Px)]
        ))
    );
}

#[cfg(test)]
#[test]
fn test_ident() {
    assert_eq!(ident("hello"), Ok(("", "hello".to_string())));
    assert_eq!(ident("-webkit-box"), Ok(("", "-webkit-box".to_string())));
    assert!(ident("~hello").is_err());
    assert!(ident("5px").is_err());
}
