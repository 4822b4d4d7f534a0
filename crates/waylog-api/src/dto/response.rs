//! Response DTOs.

use serde::{Deserialize, Serialize};

use waylog_entity::share::ShareLink;

/// Response for create and rotate: the link plus the one-time raw token.
///
/// The token appears in exactly this response and nowhere else; it cannot
/// be retrieved again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MintedShareLink {
    /// The persisted link record (digest omitted).
    #[serde(flatten)]
    pub link: ShareLink,
    /// The raw bearer token. Shown once.
    pub token: String,
}

impl MintedShareLink {
    /// Pair a link with its freshly minted raw token.
    pub fn new(link: ShareLink, token: String) -> Self {
        Self { link, token }
    }
}
