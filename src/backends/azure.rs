use super::{BackendKind, SpeechBackend, SynthesisRequest};
use crate::catalog::VoiceCatalog;
use crate::config_loader::Settings;
use crate::error::{NarratorError, Result};

/// Azure Speech neural voices over the REST synthesis endpoint.
pub struct AzureBackend {
    client: reqwest::Client,
    endpoint: String,
    key: String,
    output_format: String,
}

impl AzureBackend {
    pub fn new(settings: &Settings) -> Result<Self> {
        let endpoint = if settings.azure_endpoint.is_empty() {
            format!(
                "https://{}.tts.speech.microsoft.com/cognitiveservices/v1",
                settings.azure_region
            )
        } else {
            settings.azure_endpoint.clone()
        };

        Ok(Self {
            client: super::http_client(settings)?,
            endpoint,
            key: settings.azure_key.clone(),
            output_format: settings.azure_output_format.clone(),
        })
    }
}

/// `en-US-AriaNeural` -> `en-US`
fn locale_of(voice_id: &str) -> &str {
    let mut dashes = voice_id.match_indices('-').map(|(i, _)| i);
    match (dashes.next(), dashes.next()) {
        (Some(_), Some(second)) => &voice_id[..second],
        _ => voice_id,
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

pub(crate) fn build_ssml(request: &SynthesisRequest) -> String {
    format!(
        "<speak version='1.0' xmlns='http://www.w3.org/2001/10/synthesis' xml:lang='{}'>\
         <voice name='{}'><prosody rate='{}'>{}</prosody></voice></speak>",
        locale_of(&request.voice_id),
        escape_xml(&request.voice_id),
        request.rate,
        escape_xml(&request.text)
    )
}

#[async_trait::async_trait]
impl SpeechBackend for AzureBackend {
    fn id(&self) -> &'static str {
        "azure"
    }

    fn catalog(&self) -> VoiceCatalog {
        VoiceCatalog::builtin(BackendKind::Azure)
    }

    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>> {
        tracing::debug!(voice = %request.voice_id, rate = %request.rate, "Azure synthesis");

        let resp = self
            .client
            .post(&self.endpoint)
            .header("Ocp-Apim-Subscription-Key", &self.key)
            .header("Content-Type", "application/ssml+xml")
            .header("X-Microsoft-OutputFormat", &self.output_format)
            .body(build_ssml(request))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(NarratorError::Synthesis(format!(
                "Azure returned {}: {}",
                status,
                body.trim()
            )));
        }

        let audio = resp.bytes().await?;
        if audio.is_empty() {
            return Err(NarratorError::Synthesis(format!(
                "No audio received for voice {}",
                request.voice_id
            )));
        }
        Ok(audio.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rate::SpeechRate;

    fn request(text: &str) -> SynthesisRequest {
        SynthesisRequest {
            text: text.to_string(),
            voice_id: "en-GB-SoniaNeural".to_string(),
            rate: SpeechRate::new(-20).unwrap(),
        }
    }

    #[test]
    fn test_locale_of() {
        assert_eq!(locale_of("hi-IN-SwaraNeural"), "hi-IN");
        assert_eq!(locale_of("en-US"), "en-US");
        assert_eq!(locale_of("hi"), "hi");
    }

    #[test]
    fn test_ssml_escapes_text() {
        let ssml = build_ssml(&request("Tom & Jerry <3"));
        assert!(ssml.contains("xml:lang='en-GB'"));
        assert!(ssml.contains("<voice name='en-GB-SoniaNeural'>"));
        assert!(ssml.contains("<prosody rate='-20%'>"));
        assert!(ssml.contains("Tom &amp; Jerry &lt;3"));
    }

    #[test]
    fn test_endpoint_from_region() {
        let settings = Settings {
            azure_region: "centralindia".to_string(),
            ..Settings::default()
        };
        let backend = AzureBackend::new(&settings).unwrap();
        assert_eq!(
            backend.endpoint,
            "https://centralindia.tts.speech.microsoft.com/cognitiveservices/v1"
        );
    }
}
