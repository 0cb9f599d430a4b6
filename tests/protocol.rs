use ridepath::pipe::serve;
use ridepath::protocol::respond;
use ridepath::ServiceConfig;

const U: &str = "1.7976931348623157e308";

fn answer(request: &str) -> String {
    respond(request, &ServiceConfig::default()).0
}

#[test]
fn weighted_city_block() {
    assert_eq!(
        answer(r#"{"V":5,"source":0,"edges":[[0,1,4],[0,2,1],[2,1,2],[1,3,1],[2,3,5],[3,4,3]]}"#),
        r#"{"distances":[0,3,1,4,7]}"#
    );
}

#[test]
fn isolated_node() {
    assert_eq!(
        answer(r#"{"V":3,"source":0,"edges":[[0,1,5]]}"#),
        format!(r#"{{"distances":[0,5,{U}]}}"#)
    );
}

#[test]
fn single_node() {
    assert_eq!(answer(r#"{"V":1,"source":0,"edges":[]}"#), r#"{"distances":[0]}"#);
}

#[test]
fn upstream_nodes_unreachable() {
    assert_eq!(
        answer(r#"{"V":4,"source":2,"edges":[[0,1,1],[1,2,1],[2,3,1]]}"#),
        format!(r#"{{"distances":[{U},{U},0,1]}}"#)
    );
}

#[test]
fn source_out_of_range() {
    let body = answer(r#"{"V":3,"source":5,"edges":[]}"#);
    let value: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["error"]["code"], "source_out_of_range");
    assert!(value.get("distances").is_none());
}

#[test]
fn empty_graph() {
    assert_eq!(answer(r#"{"V":0,"source":0,"edges":[]}"#), r#"{"distances":[]}"#);
    assert!(answer(r#"{"V":0,"source":0,"edges":[[0,0,1]]}"#).contains("edge_out_of_range"));
    assert!(answer(r#"{"V":0,"source":0,"edges":[],"target":0}"#).contains("target_out_of_range"));
}

#[test]
fn each_rejection_kind_has_its_code() {
    let cases = [
        ("{", "malformed_request"),
        (r#"{"V":3,"source":0,"edges":[[0,3,1]]}"#, "edge_out_of_range"),
        (r#"{"V":3,"source":3,"edges":[]}"#, "source_out_of_range"),
        (r#"{"V":3,"source":0,"edges":[[0,1,-1]]}"#, "negative_weight"),
        (r#"{"V":3,"source":0,"edges":[],"target":3}"#, "target_out_of_range"),
        (r#"{"V":2,"source":0,"edges":[[0,1,1e308],[1,0,1e308]]}"#, "cost_overflow"),
    ];
    for (request, code) in cases {
        let (body, err) = respond(request, &ServiceConfig::default());
        assert_eq!(err.map(|e| e.code()), Some(code), "request: {request}");
        assert!(body.contains(&format!(r#""code":"{code}""#)));
        assert!(!body.contains("distances"));
    }
}

#[test]
fn pipe_session() {
    let input = [
        r#"{"V":5,"source":0,"edges":[[0,1,4],[0,2,1],[2,1,2],[1,3,1],[2,3,5],[3,4,3]],"target":4}"#,
        r#"{"V":3,"source":5,"edges":[]}"#,
        r#"{"V":0,"edges":[]}"#,
    ]
    .join("\n");
    let mut output = Vec::new();
    let stats = serve(input.as_bytes(), &mut output, &ServiceConfig::default()).unwrap();
    assert_eq!((stats.served, stats.rejected), (1, 2));

    let output = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(
        lines[0],
        concat!(
            r#"{"distances":[0,3,1,4,7],"route":{"cost":7,"nodes":[0,2,1,3,4],"segments":["#,
            r#"{"from":0,"to":2,"weight":1},{"from":2,"to":1,"weight":2},"#,
            r#"{"from":1,"to":3,"weight":1},{"from":3,"to":4,"weight":3}]}}"#
        )
    );
    assert!(lines[1].contains("source_out_of_range"));
    assert!(lines[2].contains("malformed_request"));
}
