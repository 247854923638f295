use super::*;

#[test]
fn request_carries_text_and_voice_id() {
    let body = speech_request("en-UK-hazel", "Hello there.");
    assert_eq!(body, json!({ "text": "Hello there.", "voiceId": "en-UK-hazel" }));
}

#[test]
fn audio_file_is_returned() {
    let body = json!({
        "audioFile": "https://murf.example/a.wav",
        "audioLengthInSeconds": 3.2
    });
    assert_eq!(
        parse_speech_response(&body).unwrap(),
        "https://murf.example/a.wav"
    );
}

#[test]
fn missing_audio_file_is_service_error() {
    for body in [json!({}), json!({ "audioFile": "" }), json!({ "audioFile": null })] {
        let err = parse_speech_response(&body).unwrap_err();
        assert!(matches!(err, ReelError::Service(_)));
    }
}
