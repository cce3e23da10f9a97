use crate::{Log, Token, Tokenizer};

fn collect(text: &str) -> Vec<Token> {
    let mut tokenizer = Tokenizer::new(text);
    let mut tokens = Vec::new();
    loop {
        match tokenizer.next_token() {
            Ok(Token::Eof) => {
                tokens.push(Token::Eof);
                break tokens;
            }
            Ok(token) => tokens.push(token),
            Err(err) => {
                panic!("{:?}", err);
            }
        }
    }
}

#[test]
fn element_with_attributes_test() {
    let tokens = collect("<Test a=\"1\" b='&amp;2'>hello</Test>");
    assert_eq!(
        tokens,
        vec![
            Token::StartElement {
                name: String::from("Test"),
                attributes: vec![
                    (String::from("a"), String::from("1")),
                    (String::from("b"), String::from("&2")),
                ],
            },
            Token::Text(String::from("hello")),
            Token::EndElement {
                name: String::from("Test")
            },
            Token::Eof,
        ]
    );
}

#[test]
fn bare_and_unquoted_attributes_test() {
    let tokens = collect("<input disabled value=yes/>");
    assert_eq!(
        tokens,
        vec![
            Token::EmptyElement {
                name: String::from("input"),
                attributes: vec![
                    (String::from("disabled"), String::from("disabled")),
                    (String::from("value"), String::from("yes")),
                ],
            },
            Token::Eof,
        ]
    );
}

#[test]
fn ignorable_structures_test() {
    let tokens = collect("<?xml version=\"1.0\"?><!DOCTYPE r><!--no<te-->\n<r/>");
    assert_eq!(
        tokens,
        vec![
            Token::Ignored,
            Token::Ignored,
            Token::Ignored,
            Token::EmptyElement {
                name: String::from("r"),
                attributes: Vec::new(),
            },
            Token::Eof,
        ]
    );
}

#[test]
fn doctype_with_quoted_bracket_test() {
    let tokens = collect("<!DOCTYPE r [<!ENTITY gr \"a>b\">]><r/>");
    assert_eq!(
        tokens,
        vec![
            Token::Ignored,
            Token::EmptyElement {
                name: String::from("r"),
                attributes: Vec::new(),
            },
            Token::Eof,
        ]
    );
}

#[test]
fn cdata_is_raw_test() {
    let tokens = collect("<a><![CDATA[x<y&z]]></a>");
    assert_eq!(
        tokens,
        vec![
            Token::StartElement {
                name: String::from("a"),
                attributes: Vec::new(),
            },
            Token::CData(String::from("x<y&z")),
            Token::EndElement {
                name: String::from("a")
            },
            Token::Eof,
        ]
    );
}

#[test]
fn comment_splits_text_runs_test() {
    let tokens = collect("<a>x<!--note-->y</a>");
    assert_eq!(
        tokens,
        vec![
            Token::StartElement {
                name: String::from("a"),
                attributes: Vec::new(),
            },
            Token::Text(String::from("x")),
            Token::Ignored,
            Token::Text(String::from("y")),
            Token::EndElement {
                name: String::from("a")
            },
            Token::Eof,
        ]
    );
}

#[test]
fn entity_resolution_in_text_test() {
    let tokens = collect("<a>5 &lt; 6 &copy; &#xA9; fish &chips</a>");
    assert_eq!(
        tokens[1],
        Token::Text(String::from("5 < 6 &copy; \u{a9} fish &chips"))
    );
}

#[test]
fn misshaped_tag_after_slash_test() {
    // The column points at the '/'.
    let mut tokenizer = Tokenizer::new("<name/x>");
    match tokenizer.next_token() {
        Ok(token) => panic!("unexpected token {:?}", token),
        Err(err) => {
            assert_eq!(err.message, "Misshaped tag at 5 [character 6 line 1]");
            assert_eq!(err.pointer, 5);
        }
    }
}

#[test]
fn misshaped_tag_on_bad_name_start_test() {
    let mut tokenizer = Tokenizer::new("<7up/>");
    let err = tokenizer.next_token().unwrap_err();
    assert_eq!(err.message, "Misshaped tag at 1 [character 2 line 1]");
}

#[test]
fn misplaced_angle_bracket_test() {
    let mut tokenizer = Tokenizer::new("<a <b>>");
    let err = tokenizer.next_token().unwrap_err();
    assert_eq!(err.message, "Misplaced '<' at 3 [character 4 line 1]");
}

#[test]
fn misshaped_meta_tag_test() {
    let mut tokenizer = Tokenizer::new("<!ELEMENT x>");
    let err = tokenizer.next_token().unwrap_err();
    assert_eq!(err.message, "Misshaped meta tag at 2 [character 3 line 1]");
}

#[test]
fn unterminated_meta_tag_test() {
    let mut tokenizer = Tokenizer::new("<!");
    let err = tokenizer.next_token().unwrap_err();
    assert_eq!(err.message, "Misshaped meta tag at 2 [character 3 line 1]");
}

#[test]
fn expected_cdata_test() {
    let mut tokenizer = Tokenizer::new("<![CDAT[x]]>");
    let err = tokenizer.next_token().unwrap_err();
    assert_eq!(err.message, "Expected 'CDATA[' at 3 [character 4 line 1]");
}

#[test]
fn unclosed_cdata_test() {
    let mut tokenizer = Tokenizer::new("<![CDATA[x");
    let err = tokenizer.next_token().unwrap_err();
    assert_eq!(err.message, "Unclosed CDATA at 10 [character 11 line 1]");
}

#[test]
fn carriage_returns_fold_into_line_count_test() {
    // The offset still counts both scalars of the \r\n pair.
    let mut tokenizer = Tokenizer::new("\r\n<1>");
    let err = tokenizer.next_token().unwrap_err();
    assert_eq!(err.message, "Misshaped tag at 3 [character 2 line 2]");
}

#[test]
fn unterminated_open_tag_test() {
    let mut tokenizer = Tokenizer::new("<a");
    let err = tokenizer.next_token().unwrap_err();
    assert_eq!(err.message, "Misshaped element at 2 [character 3 line 1]");
}

#[test]
fn unterminated_attribute_string_test() {
    let mut tokenizer = Tokenizer::new("<a b=\"1");
    let err = tokenizer.next_token().unwrap_err();
    assert!(
        err.message.starts_with("Unterminated string at"),
        "unexpected message: {}",
        err.message
    );
}

#[test]
fn missing_attribute_value_test() {
    let mut tokenizer = Tokenizer::new("<a b=>");
    let err = tokenizer.next_token().unwrap_err();
    assert!(
        err.message.starts_with("Missing value at"),
        "unexpected message: {}",
        err.message
    );
}

#[test]
fn log_label_assignment_test() {
    let tokenizer = Tokenizer::new("<a/>");
    tokenizer.set_log(Log::Tokens("xml")).unwrap();
    assert!(tokenizer.set_log(Log::Failures("xml")).is_err());
}
