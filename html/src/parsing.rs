use nom::{
    branch::alt,
    bytes::complete::{is_not, tag, take_until, take_while, take_while1},
    character::complete::{alpha1, char, multispace0, multispace1, satisfy},
    combinator::{map, not, opt, recognize, value},
    multi::{many0, many1},
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};
use tracing::{span, trace, Level};

use super::dom::*;

/// Elements that never have content or an end tag
static VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose content is taken verbatim up to the matching end tag
static RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Parses markup the way `innerHTML` assignment does: never fails, closes
/// unclosed elements at the end of their parent, drops stray end tags, comments
/// and doctypes, and treats a `<` that starts no tag as text.
pub fn fragment(input: &str) -> Vec<DOMNode> {
    let span = span!(Level::DEBUG, "Parsing markup");
    let _enter = span.enter();
    let mut nodes = Vec::new();
    let mut input = input;
    loop {
        if let Ok((rest, parsed)) = parse_dom_node_contents(input) {
            nodes.extend(parsed);
            input = rest;
        }
        if input.is_empty() {
            break;
        }
        match parse_close_tag(input) {
            Ok((rest, name)) => {
                trace!(tag = %name, "Dropping stray end tag");
                input = rest;
            }
            Err(_) => {
                let (lt, rest) = input.split_at(1);
                nodes.push(DOMNode::text(lt));
                input = rest;
            }
        }
    }
    nodes
}

/// Attempt to parse a string as a valid tag name
fn parse_tag_name(input: &str) -> IResult<&str, String> {
    map(
        recognize(pair(
            alpha1,
            take_while(|c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.')),
        )),
        str::to_ascii_lowercase,
    )(input)
}

/// Parse a tag in the form `</name>`, returning `name`
fn parse_close_tag(input: &str) -> IResult<&str, String> {
    let (remaining, (_, name, _, _)) =
        tuple((tag("</"), parse_tag_name, multispace0, char('>')))(input)?;
    Ok((remaining, name))
}

/// Parse a tag in the form `<name attr=value ...>`, returning the [`DOMElement`]
/// and whether the tag was self-closing
fn parse_open_tag(input: &str) -> IResult<&str, (DOMElement, bool)> {
    let (rest, (_, name, attrs, _, self_closing, _)) = tuple((
        char('<'),
        parse_tag_name,
        many0(preceded(multispace1, single_attr_parser)),
        multispace0,
        opt(char('/')),
        char('>'),
    ))(input)?;
    let mut attributes = DOMAttributes::empty();
    for (k, v) in attrs {
        attributes.insert(k.to_ascii_lowercase(), decode_entities(v));
    }
    Ok((rest, (DOMElement::new(name, Some(attributes)), self_closing.is_some())))
}

/// Parse text up to the next tag
fn parse_text(input: &str) -> IResult<&str, DOMNode> {
    let lone_angle = terminated(
        tag("<"),
        not(satisfy(|c| c.is_ascii_alphabetic() || c == '/' || c == '!' || c == '?')),
    );
    map(
        recognize(many1(alt((take_while1(|c: char| c != '<'), lone_angle)))),
        |s: &str| DOMNode::text(decode_entities(s)),
    )(input)
}

/// Comments, doctypes and processing instructions, all of which are dropped
fn parse_skipped(input: &str) -> IResult<&str, ()> {
    alt((
        value((), delimited(tag("<!--"), take_until("-->"), tag("-->"))),
        value((), tuple((tag("<!"), opt(is_not(">")), char('>')))),
        value((), tuple((tag("<?"), opt(is_not(">")), char('>')))),
    ))(input)
}

/// Parse the content between an opening and closing tag, returning the list of [`DOMNode`]'s within
fn parse_dom_node_contents(input: &str) -> IResult<&str, Vec<DOMNode>> {
    let (rest, nodes) = many0(alt((
        map(parse_skipped, |_| None),
        map(parse_dom_node, Some),
        map(parse_text, Some),
    )))(input)?;
    Ok((rest, nodes.into_iter().flatten().collect()))
}

/// Parse a complete element, closing it implicitly when its end tag is missing
pub fn parse_dom_node(input: &str) -> IResult<&str, DOMNode> {
    let (input, (open, self_closing)) = parse_open_tag(input)?;
    let name = open.tag_name.clone();
    if self_closing || VOID_ELEMENTS.contains(&name.as_str()) {
        return Ok((input, DOMNode::element(name, open.attributes, vec![])));
    }

    let (input, children) = if RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
        let (rest, raw) = raw_text(input, &name);
        let children = if raw.is_empty() { vec![] } else { vec![DOMNode::text(raw)] };
        (rest, children)
    } else {
        parse_dom_node_contents(input)?
    };

    let input = match parse_close_tag(input) {
        Ok((rest, close)) if close == name => rest,
        _ => {
            trace!(tag = %name, "Implicitly closing element");
            input
        }
    };
    Ok((input, DOMNode::element(name, open.attributes, children)))
}

/// Splits off everything before `</name`, case-insensitively
fn raw_text<'a>(input: &'a str, name: &str) -> (&'a str, &'a str) {
    let needle = format!("</{}", name);
    match input.to_ascii_lowercase().find(&needle) {
        Some(idx) => (&input[idx..], &input[..idx]),
        None => ("", input),
    }
}

/// Replaces the common named and all numeric character references
pub(crate) fn decode_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(idx) = rest.find('&') {
        out.push_str(&rest[..idx]);
        rest = &rest[idx..];
        match reference(rest) {
            Some((decoded, len)) => {
                out.push(decoded);
                rest = &rest[len..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Decodes the reference at the start of `input`, returning the character and
/// the number of bytes it spans
fn reference(input: &str) -> Option<(char, usize)> {
    let end = input.find(';')?;
    let body = &input[1..end];
    let decoded = match body {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        _ => {
            let code = if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                body.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)?
        }
    };
    Some((decoded, end + 1))
}

#[cfg(test)]
#[test]
fn test_node_parse() {
    let data = r#"<html><div class=nothing><h1></h1></div></html>"#;
    let target = DOMNode::element(
        "html",
        DOMAttributes::empty(),
        vec![DOMNode::element(
            "div",
            crate::attributes!("class" => "nothing"),
            vec![DOMNode::element("h1", DOMAttributes::empty(), vec![])],
        )],
    );
    assert_eq!(parse_dom_node(data).unwrap(), ("", target));

    let data = r#"<html><h1>Hello, world</h1></html>"#;
    let target = DOMNode::element(
        "html",
        DOMAttributes::empty(),
        vec![DOMNode::element(
            "h1",
            DOMAttributes::empty(),
            vec![DOMNode::text("Hello, world")],
        )],
    );
    assert_eq!(parse_dom_node(data).unwrap(), ("", target));
}

#[cfg(test)]
#[test]
fn test_parse_malformed() {
    let data = r#"<---></--->"#;
    assert!(parse_dom_node(data).is_err());

    // Stray end tags are dropped, unclosed elements are closed
    let nodes = fragment("<p>one</span><b>two");
    assert_eq!(
        nodes,
        vec![DOMNode::element(
            "p",
            DOMAttributes::empty(),
            vec![DOMNode::text("one")],
        ),
        DOMNode::element("b", DOMAttributes::empty(), vec![DOMNode::text("two")])]
    );
}

#[cfg(test)]
#[test]
fn test_tag_parse() {
    let data = r#"<div>"#;
    let target = DOMElement::new("div", None);
    assert_eq!(parse_open_tag(data).unwrap(), ("", (target, false)));

    let data = r#"<DIV class="nothing"/>"#;
    let target = DOMElement::new("div", Some(crate::attributes!("class" => "nothing")));
    assert_eq!(parse_open_tag(data).unwrap(), ("", (target, true)));

    let data = r#"<div attr1 attr2=two attr3='three' attr4="number four" data-x = "a&amp;b">"#;
    let target = DOMElement::new(
        "div",
        Some(crate::attributes!(
            "attr1" => "",
            "attr2" => "two",
            "attr3" => "three",
            "attr4" => "number four",
            "data-x" => "a&b",
        )),
    );
    assert_eq!(parse_open_tag(data).unwrap(), ("", (target, false)));
}

#[cfg(test)]
#[test]
fn test_decode_entities() {
    assert_eq!(decode_entities("a &lt;b&gt; &amp;&#65;&#x42;"), "a <b> &AB");
    assert_eq!(decode_entities("fish & chips"), "fish & chips");
    assert_eq!(decode_entities("&unknown;"), "&unknown;");
}

// Attribute parsing below

fn parse_single_quoted(input: &str) -> IResult<&str, &str> {
    delimited(char('\''), take_while(|c: char| c != '\''), char('\''))(input)
}

fn parse_double_quoted(input: &str) -> IResult<&str, &str> {
    delimited(char('"'), take_while(|c: char| c != '"'), char('"'))(input)
}

fn parse_unquoted(input: &str) -> IResult<&str, &str> {
    is_not(" \t\r\n\"'=<>`")(input)
}

fn value_parser(input: &str) -> IResult<&str, &str> {
    alt((parse_single_quoted, parse_double_quoted, parse_unquoted))(input)
}

fn name_parser(input: &str) -> IResult<&str, &str> {
    is_not(" \t\r\n\"'>/=")(input)
}

fn single_attr_parser(input: &str) -> IResult<&str, (&str, &str)> {
    let mut key_value = tuple((
        name_parser,
        delimited(multispace0, char('='), multispace0),
        value_parser,
    ));
    if let Ok((r, (k, _, v))) = key_value(input) {
        Ok((r, (k, v)))
    } else {
        let (r, res) = name_parser(input)?;
        Ok((r, (res, "")))
    }
}
