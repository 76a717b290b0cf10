use std::sync::Arc;

use mockito::Matcher;
use tempfile::tempdir;
use voice_narrator::backends::azure::AzureBackend;
use voice_narrator::backends::google::GoogleBackend;
use voice_narrator::backends::{SpeechBackend, SynthesisRequest};
use voice_narrator::config_loader::Settings;
use voice_narrator::detect::WhatlangDetector;
use voice_narrator::error::NO_AUDIO_HINT;
use voice_narrator::narrator::Narrator;
use voice_narrator::rate::SpeechRate;

fn azure_settings(url: &str) -> Settings {
    Settings {
        tts_backend: "azure".to_string(),
        azure_key: "test-key".to_string(),
        azure_endpoint: format!("{}/cognitiveservices/v1", url),
        ..Settings::default()
    }
}

fn google_settings(url: &str) -> Settings {
    Settings {
        google_endpoint: format!("{}/translate_tts", url),
        ..Settings::default()
    }
}

#[tokio::test]
async fn test_azure_posts_ssml() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/cognitiveservices/v1")
        .match_header("ocp-apim-subscription-key", "test-key")
        .match_header("content-type", "application/ssml+xml")
        .match_header("x-microsoft-outputformat", "audio-24khz-48kbitrate-mono-mp3")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex("<voice name='hi-IN-MadhurNeural'>".to_string()),
            Matcher::Regex(r"<prosody rate='\+10%'>".to_string()),
            Matcher::Regex("xml:lang='hi-IN'".to_string()),
        ]))
        .with_status(200)
        .with_body("ID3-azure")
        .create_async()
        .await;

    let backend = AzureBackend::new(&azure_settings(&server.url())).unwrap();
    let audio = backend
        .synthesize(&SynthesisRequest {
            text: "नमस्ते".to_string(),
            voice_id: "hi-IN-MadhurNeural".to_string(),
            rate: SpeechRate::new(10).unwrap(),
        })
        .await
        .unwrap();

    assert_eq!(audio, b"ID3-azure");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_azure_empty_body_is_no_audio() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/cognitiveservices/v1")
        .with_status(200)
        .create_async()
        .await;

    let backend = AzureBackend::new(&azure_settings(&server.url())).unwrap();
    let err = backend
        .synthesize(&SynthesisRequest {
            text: "Hello".to_string(),
            voice_id: "hi-IN-SwaraNeural".to_string(),
            rate: SpeechRate::default(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), NO_AUDIO_HINT);
}

#[tokio::test]
async fn test_azure_rejected_key() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/cognitiveservices/v1")
        .with_status(401)
        .with_body("Unauthorized")
        .create_async()
        .await;

    let backend = AzureBackend::new(&azure_settings(&server.url())).unwrap();
    let err = backend
        .synthesize(&SynthesisRequest {
            text: "Hello".to_string(),
            voice_id: "en-US-AriaNeural".to_string(),
            rate: SpeechRate::default(),
        })
        .await
        .unwrap_err();

    let message = err.user_message();
    assert!(message.starts_with("An error occurred:"), "{}", message);
    assert!(message.contains("401"), "{}", message);
}

#[tokio::test]
async fn test_google_fetches_every_chunk() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/translate_tts")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("tl".to_string(), "en".to_string()),
            Matcher::UrlEncoded("client".to_string(), "tw-ob".to_string()),
            Matcher::UrlEncoded("ttsspeed".to_string(), "0.24".to_string()),
            Matcher::UrlEncoded("total".to_string(), "2".to_string()),
        ]))
        .with_status(200)
        .with_body("ab")
        .expect(2)
        .create_async()
        .await;

    let sentence = "This sentence is sixty characters long, give or take a bit.";
    let text = format!("{} {}", sentence, sentence);

    let backend = GoogleBackend::new(&google_settings(&server.url())).unwrap();
    let audio = backend
        .synthesize(&SynthesisRequest {
            text,
            voice_id: "en".to_string(),
            rate: SpeechRate::new(-50).unwrap(),
        })
        .await
        .unwrap();

    assert_eq!(audio, b"abab");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_google_narration_switches_to_hindi() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/translate_tts")
        .match_query(Matcher::UrlEncoded("tl".to_string(), "hi".to_string()))
        .with_status(200)
        .with_body("ID3-hi")
        .create_async()
        .await;

    let dir = tempdir().unwrap();
    let settings = Settings {
        output_file: dir.path().join("final_narration.mp3").display().to_string(),
        ..google_settings(&server.url())
    };
    let backend = Arc::new(GoogleBackend::new(&settings).unwrap());
    let narrator = Narrator::new(backend, Arc::new(WhatlangDetector::new()), &settings);

    let text = "मैं आज बाजार जा रहा हूँ क्योंकि मुझे घर के लिए सब्जियाँ और फल खरीदने हैं।";
    let narration = narrator
        .generate(text, "English", SpeechRate::default())
        .await
        .unwrap();

    assert_eq!(narration.decision.voice_id, "hi");
    assert_eq!(narration.decision.label, "Hindi");
    assert_eq!(std::fs::read(&narration.path).unwrap(), b"ID3-hi");
    mock.assert_async().await;
}
