//! HTTP-backed [`PeerGetter`]: one instance per remote peer.

use async_trait::async_trait;

use crate::byte_view::ByteView;
use crate::error::GroupError;
use crate::peer::PeerGetter;

/// Fetches keys from one specific remote peer over HTTP.
pub struct HttpPeerClient {
    client: reqwest::Client,
    addr: String,
    base_path: String,
}

impl HttpPeerClient {
    pub(super) fn new(client: reqwest::Client, addr: String, base_path: String) -> Self {
        HttpPeerClient {
            client,
            addr,
            base_path,
        }
    }

    fn url_for(&self, group: &str, key: &str) -> String {
        format!(
            "{}{}{}/{}",
            self.addr.trim_end_matches('/'),
            self.base_path,
            urlencoding::encode(group),
            urlencoding::encode(key),
        )
    }
}

#[async_trait]
impl PeerGetter for HttpPeerClient {
    async fn get(&self, group: &str, key: &str) -> Result<ByteView, GroupError> {
        let url = self.url_for(group, key);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(GroupError::peer)?;

        if !response.status().is_success() {
            return Err(GroupError::peer(format!(
                "peer returned HTTP {}",
                response.status()
            )));
        }

        let bytes = response.bytes().await.map_err(GroupError::peer)?;
        Ok(ByteView::from_owned(bytes.to_vec()))
    }
}
