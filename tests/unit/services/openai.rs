use super::*;
use crate::services::ScriptScene;

#[test]
fn script_request_uses_strict_scene_schema() {
    let body = script_request("gpt-4o", "A bedtime story about a unicorn.");
    assert_eq!(body["model"], "gpt-4o");
    assert_eq!(body["input"][0]["role"], "system");
    assert_eq!(body["input"][1]["content"], "A bedtime story about a unicorn.");

    let format = &body["text"]["format"];
    assert_eq!(format["type"], "json_schema");
    assert_eq!(format["strict"], true);
    let item = &format["schema"]["properties"]["scenes"]["items"];
    assert_eq!(item["required"], json!(["text", "image", "voice"]));
    assert_eq!(item["additionalProperties"], false);
}

#[test]
fn image_request_asks_for_one_square_image() {
    let body = image_request("dall-e-3", "a unicorn in a meadow");
    assert_eq!(body["size"], "1024x1024");
    assert_eq!(body["quality"], "standard");
    assert_eq!(body["n"], 1);
}

#[test]
fn script_is_read_from_output_text() {
    let response = json!({
        "id": "resp_1",
        "output": [
            { "type": "reasoning", "content": [] },
            {
                "type": "message",
                "content": [{
                    "type": "output_text",
                    "text": "{\"scenes\":[{\"text\":\"Once upon a time.\",\"image\":\"a castle\",\"voice\":\"en-US-miles\"},{\"text\":\"The end.\",\"image\":\"a sunset\",\"voice\":\"en-US-miles\"}]}"
                }]
            }
        ]
    });
    let script = parse_script_response(&response).unwrap();
    assert_eq!(script.scenes.len(), 2);
    assert_eq!(
        script.scenes[0],
        ScriptScene {
            text: "Once upon a time.".to_string(),
            image: "a castle".to_string(),
            voice: "en-US-miles".to_string(),
        }
    );
    assert_eq!(script.scenes[1].image, "a sunset");
}

#[test]
fn script_without_text_is_service_error() {
    let err = parse_script_response(&json!({ "output": [] })).unwrap_err();
    assert!(matches!(err, ReelError::Service(_)));

    let refused = json!({
        "output": [{ "content": [{ "type": "refusal", "refusal": "no" }] }]
    });
    assert!(matches!(
        parse_script_response(&refused),
        Err(ReelError::Service(_))
    ));
}

#[test]
fn malformed_script_json_is_service_error() {
    let response = json!({
        "output": [{ "content": [{ "type": "output_text", "text": "{\"scenes\": 3}" }] }]
    });
    assert!(matches!(
        parse_script_response(&response),
        Err(ReelError::Service(_))
    ));
}

#[test]
fn image_url_is_first_entry() {
    let response = json!({
        "created": 1,
        "data": [{ "url": "https://img.example/1.png" }, { "url": "https://img.example/2.png" }]
    });
    assert_eq!(
        parse_image_response(&response).unwrap(),
        "https://img.example/1.png"
    );
    assert!(parse_image_response(&json!({ "data": [] })).is_err());
    assert!(parse_image_response(&json!({ "data": [{ "b64_json": "AAAA" }] })).is_err());
}
