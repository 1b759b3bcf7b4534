pub mod client;
pub mod imagen;
pub mod text;
pub mod types;

pub use imagen::GeminiImagenClient;
pub use text::GeminiTextClient;

/// Adds a test-only `with_base_url` to clients wrapping a `GeminiHttpClient`
/// in a field named `http`.
#[cfg(test)]
macro_rules! impl_with_gemini_base_url {
    ($client:ty) => {
        impl $client {
            pub(crate) fn with_base_url(mut self, base_url: String) -> Self {
                self.http = self.http.with_base_url(base_url);
                self
            }
        }
    };
}

#[cfg(test)]
pub(crate) use impl_with_gemini_base_url;
