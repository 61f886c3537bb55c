use super::*;

#[test]
fn test_parse_value() {
    assert_eq!(parse_value("red"), Some(Value::Color(ColorValue::rgb(255, 0, 0))));
    assert_eq!(parse_value(" 300px "), Some(Value::Length(300.0, Unit::Px)));
    assert_eq!(
        parse_value("1px solid black"),
        Some(Value::Multiple(vec![
            Value::Length(1.0, Unit::Px),
            Value::Keyword("solid".to_string()),
            Value::Color(BLACK),
        ]))
    );
    assert_eq!(parse_value(""), None);
    assert_eq!(parse_value("12zz"), None);
    assert_eq!(parse_value("rgb(1, 2"), None);
}

#[test]
fn test_declaration_list() {
    let i = r#"color: black;
background-color: rgb(197,93,161); ;BLAHBALH; width: 10px !important"#;
    let decls = declaration_list(i);
    let names: Vec<&str> = decls.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["color", "background-color", "width"]);
    assert_eq!(decls[1].value, Value::Color(ColorValue::rgb(197, 93, 161)));
    assert!(decls[2].important);
    assert_eq!(decls[2].specified, "10px");
}

#[test]
fn test_style_declarations() {
    let mut style = StyleDeclarations::new();
    assert!(style.set_property("backgroundColor", "red"));
    assert!(style.set_property("width", "300px"));
    assert!(!style.set_property("height", "not a length ("));
    assert_eq!(style.len(), 2);
    assert_eq!(style.get_property_value("background-color"), "red");
    assert_eq!(style.css_text(), "background-color: red; width: 300px;");

    // Replacing keeps the original position
    assert!(style.set_property("background-color", "#00f"));
    assert_eq!(style.css_text(), "background-color: #00f; width: 300px;");

    assert!(style.set_property("width", ""));
    assert_eq!(style.get("width"), None);

    style.set_css_text("color: white; color: black");
    assert_eq!(style.css_text(), "color: black;");
}

#[test]
fn test_value_types() {
    let mut style = StyleDeclarations::new();
    assert!(!style.set_property("width", "red"));
    assert!(!style.set_property("color", "300px"));
    assert!(!style.set_property("opacity", "none"));
    assert!(!style.set_property("display", "10px"));
    assert!(!style.set_property("height", "-5px"));
    assert!(style.is_empty());

    assert!(style.set_property("width", "50%"));
    assert!(style.set_property("height", "auto"));
    assert!(style.set_property("color", "inherit"));
    assert!(style.set_property("opacity", "0"));
    assert!(style.set_property("visibility", "hidden"));
    // Unchecked properties take any value
    assert!(style.set_property("border", "1px solid black"));

    style.set_css_text("width: blue; color: #123; display: 0");
    assert_eq!(style.css_text(), "color: #123;");
}

#[test]
fn test_property_name() {
    assert_eq!(property_name("backgroundColor"), "background-color");
    assert_eq!(property_name("width"), "width");
    assert_eq!(property_name("cssFloat"), "float");
    assert_eq!(property_name("webkitTransform"), "-webkit-transform");
    assert_eq!(property_name("WebkitTransform"), "-webkit-transform");
    assert_eq!(property_name("--myVar"), "--myVar");
}

#[test]
fn test_computed_serialization() {
    assert_eq!(parse_value("red").unwrap().to_computed(), "rgb(255, 0, 0)");
    assert_eq!(parse_value("transparent").unwrap().to_computed(), "rgba(0, 0, 0, 0)");
    assert_eq!(parse_value("1in").unwrap().to_computed(), "96px");
    assert_eq!(parse_value("2em").unwrap().to_computed(), "32px");
    assert_eq!(parse_value("10vw").unwrap().to_computed(), "10vw");
    assert_eq!(parse_value("0.5").unwrap().to_computed(), "0.5");
    assert_eq!(parse_value("BLOCK").unwrap().to_computed(), "block");
}

#[test]
fn test_inherited() {
    assert!(is_inherited("visibility"));
    assert!(is_inherited("color"));
    assert!(!is_inherited("display"));
    assert_eq!(initial_value("opacity"), Some(Value::Number(1.0)));
}
