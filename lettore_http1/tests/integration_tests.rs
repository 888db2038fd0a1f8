// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

//! Integration tests for the HTTP/1.1 request head parser.

use lettore_http::{
    Error,
    ErrorCode,
    HeaderName,
    HttpParseError,
    HttpVersion,
    Method,
    Request,
    RequestTarget,
};
use lettore_http1::{
    Driver,
    ParserConfig,
    Strictness,
};
use rstest::rstest;
use tokio::io::{
    AsyncReadExt,
    AsyncWriteExt,
    BufReader,
};

fn reject_reason(driver: &mut Driver, input: &str) -> Option<HttpParseError> {
    match driver.parse(input) {
        Ok(request) => panic!("accepted {request:?}"),
        Err(error) => error.reason(),
    }
}

#[test]
fn test_simple_get() {
    let mut driver = Driver::default();
    let request = driver.parse("GET /index.html HTTP/1.1\r\nHost: example.com\r\n\r\n").unwrap();

    assert_eq!(request.method, Method::Get);
    assert_eq!(request.target, "/index.html");
    assert_eq!(request.version, HttpVersion::Http11);

    let fields: Vec<_> = request.headers.iter()
        .map(|field| (field.name().to_owned(), field.value().to_string()))
        .collect();
    assert_eq!(fields, vec![("Host".to_owned(), "example.com".to_owned())]);

    assert_eq!(driver.status(), ErrorCode::Success);
    assert!(driver.request().is_some());
}

#[test]
fn test_conflicting_content_length() {
    let mut driver = Driver::default();
    let reason = reject_reason(&mut driver, "GET /x HTTP/1.1\r\nContent-Length: 5\r\nContent-Length: 6\r\n\r\n");
    assert_eq!(reason, Some(HttpParseError::ConflictingContentLength));
    assert_eq!(driver.status(), ErrorCode::SyntaxError);
    assert!(driver.request().is_none());
}

#[test]
fn test_empty_input() {
    let mut driver = Driver::default();
    let error = driver.parse("").unwrap_err();
    assert_eq!(error.code(), ErrorCode::SyntaxError);
    assert!(driver.request().is_none());
    assert!(driver.take_request().is_none());
}

#[rstest]
#[case::missing_request_line_crlf("GET / HTTP/1.1")]
#[case::missing_final_crlf("GET / HTTP/1.1\r\nHost: a\r\n")]
#[case::missing_space_after_method("GET/ HTTP/1.1\r\n\r\n")]
#[case::missing_space_after_target("GET /HTTP/1.1\r\n\r\n")]
#[case::double_space("GET  / HTTP/1.1\r\n\r\n")]
#[case::header_without_colon("GET / HTTP/1.1\r\nHost example.com\r\n\r\n")]
#[case::lone_cr_after_request_line("GET / HTTP/1.1\rHost: a\r\n\r\n")]
#[case::lone_cr_after_header("GET / HTTP/1.1\r\nHost: a\rAccept: */*\r\n\r\n")]
#[case::lone_cr_in_value("GET / HTTP/1.1\r\nHost: a\rb\r\n\r\n")]
#[case::bare_lf("GET / HTTP/1.1\n\n")]
#[case::empty_target("GET  HTTP/1.1\r\n\r\n")]
#[case::obsolete_line_folding("GET / HTTP/1.1\r\nX-Long: a\r\n\tb\r\n\r\n")]
#[case::unsupported_version("GET / HTTP/3.0\r\n\r\n")]
#[case::lowercase_version("GET / http/1.1\r\n\r\n")]
#[case::space_in_name("GET / HTTP/1.1\r\nX Y: a\r\n\r\n")]
#[case::space_before_colon("GET / HTTP/1.1\r\nHost : a\r\n\r\n")]
#[case::control_in_value("GET / HTTP/1.1\r\nHost: a\x07\r\n\r\n")]
fn test_malformed_is_rejected(#[case] input: &str) {
    for config in [ParserConfig::default(), ParserConfig::strict()] {
        let mut driver = Driver::new(config);
        let error = driver.parse(input).unwrap_err();
        assert!(matches!(error, Error::Parse { .. }), "{error:?}");
        assert_eq!(driver.status(), ErrorCode::SyntaxError);
        assert!(driver.request().is_none());
        assert!(driver.head_length().is_none());
    }
}

#[test]
fn test_no_state_retained_between_parses() {
    let mut driver = Driver::default();
    driver.parse("POST /a?x=1 HTTP/1.1\r\nHost: a\r\nContent-Length: 3\r\nX-First: yes\r\n\r\n").unwrap();

    let request = driver.parse("GET /b HTTP/1.0\r\nAccept: */*\r\n\r\n").unwrap();
    assert_eq!(request.method, Method::Get);
    assert_eq!(request.target, "/b");
    assert_eq!(request.version, HttpVersion::Http10);
    assert_eq!(request.headers.len(), 1);
    assert!(!request.headers.contains(HeaderName::Host));
    assert_eq!(request.content_length(), None);

    // A previous Content-Length must not conflict with the next request.
    driver.parse("PUT /c HTTP/1.1\r\nContent-Length: 7\r\n\r\n").unwrap();
    let request = driver.parse("PUT /c HTTP/1.1\r\nContent-Length: 9\r\n\r\n").unwrap();
    assert_eq!(request.content_length(), Some(9));
}

#[test]
fn test_rejection_does_not_poison_driver() {
    let mut driver = Driver::default();
    driver.parse("GET / HTTP/1.1\r\nbroken\r\n\r\n").unwrap_err();

    let request = driver.parse("HEAD /ok HTTP/1.1\r\n\r\n").unwrap();
    assert_eq!(request.method, Method::Head);
    assert!(request.headers.is_empty());
}

#[test]
fn test_duplicates_keep_order() {
    let mut driver = Driver::default();
    let request = driver.parse(concat!(
        "GET / HTTP/1.1\r\n",
        "Accept: text/html\r\n",
        "cookie: a=1\r\n",
        "Accept: application/json\r\n",
        "Cookie: b=2\r\n",
        "\r\n",
    )).unwrap();

    let names: Vec<_> = request.headers.iter().map(|field| field.name()).collect();
    assert_eq!(names, ["Accept", "cookie", "Accept", "Cookie"]);

    let accept: Vec<_> = request.headers.get_all("accept").map(|value| value.to_string()).collect();
    assert_eq!(accept, ["text/html", "application/json"]);

    let cookies: Vec<_> = request.headers.get_all(HeaderName::Cookie).map(|value| value.to_string()).collect();
    assert_eq!(cookies, ["a=1", "b=2"]);
}

#[rstest]
#[case("GET /index.html HTTP/1.1\r\nHost: example.com\r\n\r\n")]
#[case("POST /form?q=a%20b HTTP/1.0\r\nContent-Type:text/plain\r\nContent-Length:   12   \r\n\r\n")]
#[case("OPTIONS * HTTP/1.1\r\nHost: h\r\nX-Empty:\r\nX-Tabs:\tleft\tright\t\r\n\r\n")]
#[case("PURGE http://cache.example/x HTTP/1.1\r\nhost: cache.example\r\n\r\n")]
#[case("\r\nCONNECT example.com:443 HTTP/1.1\r\nHost: example.com:443\r\n\r\n")]
fn test_canonical_form_parses_to_equal_request(#[case] input: &str) {
    let mut driver = Driver::default();
    let first: Request = driver.parse(input).unwrap().clone();

    let canonical = first.to_canonical_bytes();
    let second = driver.parse_bytes(canonical.clone()).unwrap();
    assert_eq!(&first, second);
    assert_eq!(second.to_canonical_bytes(), canonical);
}

#[test]
fn test_canonical_rendering() {
    let mut driver = Driver::default();
    let request = driver.parse("GET /x HTTP/1.1\r\nhost:   example.com  \r\nAccept:*/*\r\n\r\n").unwrap();
    assert_eq!(request.to_string(), "GET /x HTTP/1.1\r\nhost: example.com\r\nAccept: */*\r\n\r\n");
}

#[rstest]
#[case("BREW /pot HTTP/1.1\r\nHost: a\r\n\r\n", HttpParseError::UnknownMethod)]
#[case("GET / HTTP/1.1\r\nHost: a\r\nContent-Length: 1\r\nContent-Length: 1\r\n\r\n", HttpParseError::DuplicateContentLength)]
#[case("GET / HTTP/1.1\r\nAccept: */*\r\n\r\n", HttpParseError::MissingHost)]
#[case("GET / HTTP/1.1\r\nHost: a\r\nHost: b\r\n\r\n", HttpParseError::DuplicateHost)]
fn test_strictness(#[case] input: &str, #[case] strict_reason: HttpParseError) {
    let mut lenient = Driver::new(ParserConfig::default());
    assert!(lenient.parse(input).is_ok());

    let strictness: Strictness = "strict".parse().unwrap();
    let mut strict = Driver::new(ParserConfig::default().with_strictness(strictness));
    assert_eq!(reject_reason(&mut strict, input), Some(strict_reason));
}

#[test]
fn test_extension_method() {
    let mut driver = Driver::default();
    let request = driver.parse("BREW /pot HTTP/1.1\r\n\r\n").unwrap();
    assert_eq!(request.method, Method::Extension("BREW".to_owned()));
    assert!(request.method.is_extension());
    assert_eq!(request.to_string(), "BREW /pot HTTP/1.1\r\n\r\n");
}

#[test]
fn test_body_offset() {
    let input = b"POST /upload HTTP/1.1\r\nHost: a\r\nContent-Length: 11\r\n\r\nhello world";
    let mut driver = Driver::default();
    let request = driver.parse_bytes(&input[..]).unwrap();
    let length = request.content_length().unwrap() as usize;

    let offset = driver.head_length().unwrap();
    assert_eq!(&input[offset..offset + length], b"hello world");
}

#[test]
fn test_target_forms() {
    let mut driver = Driver::default();

    let request = driver.parse("GET /search?q=rust HTTP/1.1\r\n\r\n").unwrap();
    assert_eq!(request.target_form(), Some(RequestTarget::Origin { path: "/search", query: "q=rust" }));

    let request = driver.parse("OPTIONS * HTTP/1.1\r\n\r\n").unwrap();
    assert_eq!(request.target_form(), Some(RequestTarget::Asterisk));
}

#[test]
fn test_limits() {
    let mut config = ParserConfig::default();
    config.limits.request_target.0 = 8;
    let mut driver = Driver::new(config);

    assert!(driver.parse("GET /1234567 HTTP/1.1\r\n\r\n").is_ok());
    assert_eq!(reject_reason(&mut driver, "GET /12345678 HTTP/1.1\r\n\r\n"), Some(HttpParseError::RequestTargetTooLarge));
}

#[test]
fn test_error_descriptions() {
    let mut driver = Driver::default();
    let error = driver.parse("GET / HTTP/1.1\r\nHost a\r\n\r\n").unwrap_err();

    assert_eq!(error.to_string(), "header line does not contain a colon (at offset 16)");
    assert_eq!(error.code().description(), ErrorCode::describe_raw(error.code() as u8).unwrap());
    assert_eq!(ErrorCode::describe_raw(200), None);
}

#[tokio::test]
async fn test_parse_from_stream() {
    let (client, server) = tokio::io::duplex(64);

    let writer = tokio::spawn(async move {
        let mut client = client;
        client.write_all(b"POST /echo HTTP/1.1\r\nHost: localhost\r\nContent-Length: 4\r\n\r\nping").await.unwrap();
        client.shutdown().await.unwrap();
    });

    let mut stream = BufReader::new(server);
    let mut driver = Driver::default();
    let request = driver.parse_async(&mut stream).await.unwrap();
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.headers.get(HeaderName::Host).map(|value| value.to_string()), Some("localhost".to_owned()));

    let mut body = String::new();
    stream.read_to_string(&mut body).await.unwrap();
    assert_eq!(body, "ping");

    writer.await.unwrap();
}

#[tokio::test]
async fn test_truncated_stream() {
    let mut stream = std::io::Cursor::new(&b"GET / HTTP/1.1\r\nHost: loc"[..]);
    let mut driver = Driver::default();
    let error = driver.parse_async(&mut stream).await.unwrap_err();
    assert_eq!(error.reason(), Some(HttpParseError::UnexpectedEndOfInput));
}

struct UnreadableSource;

impl std::io::Read for UnreadableSource {
    fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
        Err(std::io::ErrorKind::BrokenPipe.into())
    }
}

#[test]
fn test_resource_exhaustion() {
    let mut driver = Driver::new(ParserConfig::default().with_header_capacity(usize::MAX));
    let error = driver.parse("GET / HTTP/1.1\r\nHost: a\r\n\r\n").unwrap_err();
    assert_eq!(error.code(), ErrorCode::ResourceExhausted);
    assert_eq!(driver.status(), ErrorCode::ResourceExhausted);
    assert!(driver.request().is_none());
    assert!(driver.head_length().is_none());
}

#[test]
fn test_io_failure_after_accepted_request() {
    let mut driver = Driver::default();
    driver.parse("GET / HTTP/1.1\r\nHost: a\r\n\r\n").unwrap();

    let error = driver.parse_reader(&mut std::io::BufReader::new(UnreadableSource)).unwrap_err();
    assert!(matches!(error, Error::Io(..)));
    assert_eq!(driver.status(), ErrorCode::IoFailure);
    assert!(driver.request().is_none());
    assert!(driver.parser().is_none());
    assert_eq!(driver.head_length(), None);

    assert!(driver.parse("GET /next HTTP/1.1\r\n\r\n").is_ok());
}
