use super::{ImageGenerationService, TextGenerationService};
use crate::models::GeneratedImage;
use crate::request::{ImageRequest, TextRequest};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::Barrier;

#[derive(Clone)]
enum MockReply<T> {
    Ok(T),
    Err(String),
}

impl<T: Clone> MockReply<T> {
    fn to_result(&self) -> Result<T> {
        match self {
            MockReply::Ok(value) => Ok(value.clone()),
            MockReply::Err(message) => Err(Error::AiProvider(message.clone())),
        }
    }
}

/// JSON body of a complete, well-formed content response.
pub fn sample_content_json() -> String {
    let calendar: Vec<serde_json::Value> = (1..=7)
        .map(|day| {
            serde_json::json!({
                "day": format!("Hari {}", day),
                "idea": format!("Ide konten hari {}", day),
            })
        })
        .collect();

    serde_json::json!({
        "captions": {
            "whatsapp": "Halo kak! Produk favorit sudah ready, yuk pesan sekarang.",
            "instagram": "Siap bikin harimu lebih seru ✨ #umkm #produklokal",
            "facebook": "Cerita di balik produk kami dimulai dari dapur kecil...",
            "threads": "1/ Kenapa produk ini beda? 🧵",
            "marketplace": "- Bahan premium\n- Tahan lama\n- Harga terjangkau",
        },
        "calendar": calendar,
    })
    .to_string()
}

/// Scripted text generator. Replies cycle through the configured list.
#[derive(Clone)]
pub struct MockTextGenerationClient {
    responses: Arc<Mutex<Vec<MockReply<String>>>>,
    requests: Arc<Mutex<Vec<TextRequest>>>,
    call_count: Arc<Mutex<usize>>,
    barrier: Option<Arc<Barrier>>,
}

impl MockTextGenerationClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
            barrier: None,
        }
    }

    pub fn with_text_response(self, response: String) -> Self {
        self.responses.lock().unwrap().push(MockReply::Ok(response));
        self
    }

    pub fn with_error(self, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push(MockReply::Err(message.to_string()));
        self
    }

    /// Wait on `barrier` before replying.
    pub fn with_barrier(mut self, barrier: Arc<Barrier>) -> Self {
        self.barrier = Some(barrier);
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn last_request(&self) -> Option<TextRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl Default for MockTextGenerationClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerationService for MockTextGenerationClient {
    async fn generate_text(&self, request: &TextRequest) -> Result<String> {
        let count = {
            let mut count = self.call_count.lock().unwrap();
            *count += 1;
            *count
        };
        self.requests.lock().unwrap().push(request.clone());

        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(sample_content_json())
        } else {
            responses[(count - 1) % responses.len()].to_result()
        }
    }
}

/// Scripted image generator. Replies cycle through the configured list.
#[derive(Clone)]
pub struct MockImageGenerationClient {
    responses: Arc<Mutex<Vec<MockReply<Vec<GeneratedImage>>>>>,
    requests: Arc<Mutex<Vec<ImageRequest>>>,
    call_count: Arc<Mutex<usize>>,
    barrier: Option<Arc<Barrier>>,
}

impl MockImageGenerationClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
            barrier: None,
        }
    }

    pub fn with_image_response(self, data: Vec<u8>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push(MockReply::Ok(vec![GeneratedImage {
                mime_type: "image/jpeg".to_string(),
                data,
            }]));
        self
    }

    /// Reply with an empty image list, as when every sample was filtered.
    pub fn with_no_images(self) -> Self {
        self.responses.lock().unwrap().push(MockReply::Ok(Vec::new()));
        self
    }

    pub fn with_error(self, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push(MockReply::Err(message.to_string()));
        self
    }

    /// Wait on `barrier` before replying.
    pub fn with_barrier(mut self, barrier: Arc<Barrier>) -> Self {
        self.barrier = Some(barrier);
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn last_request(&self) -> Option<ImageRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl Default for MockImageGenerationClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenerationService for MockImageGenerationClient {
    async fn generate_images(&self, request: &ImageRequest) -> Result<Vec<GeneratedImage>> {
        let count = {
            let mut count = self.call_count.lock().unwrap();
            *count += 1;
            *count
        };
        self.requests.lock().unwrap().push(request.clone());

        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Minimal JPEG header is enough for the data URI.
            Ok(vec![GeneratedImage {
                mime_type: "image/jpeg".to_string(),
                data: vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46],
            }])
        } else {
            responses[(count - 1) % responses.len()].to_result()
        }
    }
}
