//! Endpoint groups, one per API resource.
//!
//! Every group wraps the shared [`ClientContext`] and implements
//! [`ApiEndpoint`], which fixes the resource root (`voices`, `history`, ...)
//! and builds request URLs under it.

use crate::client::ClientContext;

mod dubbing;
mod history;
mod models;
mod sound_generation;
mod text_to_speech;
mod user;
mod voice_generation;
mod voices;

pub use dubbing::DubbingEndpoint;
pub use history::HistoryEndpoint;
pub use models::ModelsEndpoint;
pub use sound_generation::SoundGenerationEndpoint;
pub use text_to_speech::{SpeechStream, TextToSpeechEndpoint};
pub use user::UserEndpoint;
pub use voice_generation::VoiceGenerationEndpoint;
pub use voices::VoicesEndpoint;

/// A group of operations under one resource root.
pub trait ApiEndpoint {
    /// Path segment directly under the versioned base URL.
    const ROOT: &'static str;

    fn context(&self) -> &ClientContext;

    /// `{base_url}/{ROOT}{suffix}`. `suffix` is empty or starts with `/`.
    fn url(&self, suffix: &str) -> String {
        format!("{}/{}{}", self.context().base_url(), Self::ROOT, suffix)
    }
}

/// Declares an endpoint struct holding the shared context.
macro_rules! endpoint {
    ($(#[$meta:meta])* $name:ident, $root:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            context: std::sync::Arc<$crate::client::ClientContext>,
        }

        impl $name {
            pub fn new(context: std::sync::Arc<$crate::client::ClientContext>) -> Self {
                Self { context }
            }
        }

        impl $crate::endpoints::ApiEndpoint for $name {
            const ROOT: &'static str = $root;

            fn context(&self) -> &$crate::client::ClientContext {
                &self.context
            }
        }
    };
}

pub(crate) use endpoint;

