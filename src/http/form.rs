use reqwest::multipart::{Form, Part};

use crate::{error::SubmitError, generation::request::SubmissionRequest};

pub const LYRICS_FIELD: &str = "lyrics";
pub const GENRE_FIELD: &str = "genre";
pub const VOICE_SAMPLE_FIELD: &str = "voice_sample";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    File {
        file_name: String,
        mime: String,
        bytes: Vec<u8>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub value: FieldValue,
}

/// The multipart body of a generation request, in field order, before it is
/// handed to reqwest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartPayload {
    pub fields: Vec<Field>,
}

impl MultipartPayload {
    pub fn from_request(request: &SubmissionRequest) -> Self {
        let mut fields = vec![
            Field {
                name: LYRICS_FIELD,
                value: FieldValue::Text(request.lyrics.clone()),
            },
            Field {
                name: GENRE_FIELD,
                value: FieldValue::Text(request.genre.as_str().to_string()),
            },
        ];

        if let Some(sample) = &request.voice_sample {
            fields.push(Field {
                name: VOICE_SAMPLE_FIELD,
                value: FieldValue::File {
                    file_name: sample.file_name.clone(),
                    mime: sample.mime.clone(),
                    bytes: sample.bytes.clone(),
                },
            });
        }

        Self { fields }
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.value)
    }

    pub fn into_form(self) -> Result<Form, SubmitError> {
        let mut form = Form::new();
        for field in self.fields {
            form = match field.value {
                FieldValue::Text(text) => form.text(field.name, text),
                FieldValue::File {
                    file_name,
                    mime,
                    bytes,
                } => {
                    let part = Part::bytes(bytes).file_name(file_name).mime_str(&mime)?;
                    form.part(field.name, part)
                }
            };
        }
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::request::{Genre, VoiceSample};
    use pretty_assertions::assert_eq;

    #[test]
    fn text_only_request_has_exactly_two_fields() {
        let request = SubmissionRequest::new("first verse", Genre::Pop);
        let payload = MultipartPayload::from_request(&request);

        assert_eq!(payload.field_names(), vec![LYRICS_FIELD, GENRE_FIELD]);
        assert_eq!(
            payload.get(LYRICS_FIELD),
            Some(&FieldValue::Text("first verse".into()))
        );
        assert_eq!(payload.get(GENRE_FIELD), Some(&FieldValue::Text("Pop".into())));
        assert_eq!(payload.get(VOICE_SAMPLE_FIELD), None);
    }

    #[test]
    fn lyrics_are_sent_untrimmed() {
        let request = SubmissionRequest::new("  hook\n", Genre::Trap);
        let payload = MultipartPayload::from_request(&request);
        assert_eq!(
            payload.get(LYRICS_FIELD),
            Some(&FieldValue::Text("  hook\n".into()))
        );
    }

    #[test]
    fn voice_sample_is_attached_with_exact_bytes() {
        let bytes = vec![0x52, 0x49, 0x46, 0x46, 0x00, 0xff];
        let request = SubmissionRequest::new("bridge", Genre::RnB)
            .with_voice_sample(VoiceSample::new("me.wav", bytes.clone()));
        let payload = MultipartPayload::from_request(&request);

        assert_eq!(
            payload.field_names(),
            vec![LYRICS_FIELD, GENRE_FIELD, VOICE_SAMPLE_FIELD]
        );
        assert_eq!(
            payload.get(VOICE_SAMPLE_FIELD),
            Some(&FieldValue::File {
                file_name: "me.wav".into(),
                mime: "audio/wav".into(),
                bytes,
            })
        );
        assert_eq!(payload.get(GENRE_FIELD), Some(&FieldValue::Text("R&B".into())));
    }

    #[test]
    fn converts_into_reqwest_form() {
        let request = SubmissionRequest::new("outro", Genre::LoFi)
            .with_voice_sample(VoiceSample::new("me.mp3", vec![1, 2, 3]));
        let form = MultipartPayload::from_request(&request).into_form();
        assert!(form.is_ok());
    }
}
