//! `Client` against a local HTTP stub, so the status and decode paths run without network.

use continent_explorer::api::{EnrichError, enrich_batch};
use continent_explorer::{Client, Country, CountryLookup};
use reqwest::StatusCode;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

/// Answers `/alpha/NG` and `/alpha/EG` with one record, `/alpha/EM` with `[]`,
/// `/alpha/BAD` with a non-JSON body, and everything else with 404.
fn stub_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            thread::spawn(move || serve(stream));
        }
    });
    format!("http://{addr}/v3.1")
}

fn serve(stream: TcpStream) {
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    // Drain headers.
    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) if line == "\r\n" || line == "\n" => break,
            Ok(_) => {}
            Err(_) => return,
        }
    }

    let path = request_line.split_whitespace().nth(1).unwrap_or("");
    let (status, body) = match path {
        "/v3.1/alpha/NG" => (
            "200 OK",
            r#"[{"capital":["Abuja"],"flags":{"svg":"https://flagcdn.com/ng.svg"}}]"#,
        ),
        "/v3.1/alpha/EG" => (
            "200 OK",
            r#"[{"capital":["Cairo"],"flags":{"png":"https://flagcdn.com/w320/eg.png"}}]"#,
        ),
        "/v3.1/alpha/EM" => ("200 OK", "[]"),
        "/v3.1/alpha/BAD" => ("200 OK", "<html>oops</html>"),
        _ => ("404 Not Found", r#"{"status":404,"message":"Not Found"}"#),
    };
    let response = format!(
        "HTTP/1.1 {status}\r\n\
         Content-Type: application/json\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\r\n{body}",
        body.len()
    );
    let mut stream = stream;
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

fn country(code: &str) -> Country {
    Country {
        code: code.into(),
        name: code.into(),
        continent: "AF".into(),
    }
}

#[test]
fn lookup_returns_first_record() {
    let client = Client::with_base_url(stub_server()).unwrap();
    let rec = client.lookup("NG").unwrap();
    assert_eq!(rec.first_capital(), "Abuja");
    assert_eq!(rec.flag_url(), "https://flagcdn.com/ng.svg");
}

#[test]
fn empty_record_set_is_no_record() {
    let client = Client::with_base_url(stub_server()).unwrap();
    let err = client.lookup("EM").unwrap_err();
    assert!(matches!(err, EnrichError::NoRecord { ref code } if code == "EM"), "{err}");
}

#[test]
fn not_found_is_a_status_error() {
    let client = Client::with_base_url(stub_server()).unwrap();
    match client.lookup("QQ").unwrap_err() {
        EnrichError::Status { code, status } => {
            assert_eq!(code, "QQ");
            assert_eq!(status, StatusCode::NOT_FOUND);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn undecodable_body_is_a_decode_error() {
    let client = Client::with_base_url(stub_server()).unwrap();
    let err = client.lookup("BAD").unwrap_err();
    assert!(matches!(err, EnrichError::Decode { .. }), "{err}");
}

#[test]
fn refused_connection_is_an_http_error() {
    // Bind and drop to get a port nothing listens on.
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let client = Client::with_base_url(format!("http://127.0.0.1:{port}/v3.1")).unwrap();
    let err = client.lookup("NG").unwrap_err();
    assert!(matches!(err, EnrichError::Http { .. }), "{err}");
}

#[test]
fn batch_over_the_client_succeeds_in_order() {
    let client = Client::with_base_url(stub_server()).unwrap();
    let out = enrich_batch(&client, &[country("EG"), country("NG")]).unwrap();
    assert_eq!(out[0].capital, "Cairo");
    assert_eq!(out[0].flag, "https://flagcdn.com/w320/eg.png");
    assert_eq!(out[1].capital, "Abuja");
}

#[test]
fn batch_over_the_client_fails_when_one_code_is_not_found() {
    let client = Client::with_base_url(stub_server()).unwrap();
    let err = enrich_batch(&client, &[country("NG"), country("QQ"), country("EG")]).unwrap_err();
    assert!(
        matches!(
            err,
            EnrichError::Status { ref code, status }
                if code == "QQ" && status == StatusCode::NOT_FOUND
        ),
        "{err}"
    );
}
