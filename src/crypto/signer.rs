use std::collections::BTreeMap;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use super::hasher::Hasher;
use super::sha512::Sha512Hasher;

/// A request whose parameters have been signed with the account secret.
///
/// `params` holds exactly what was signed: the caller's parameters plus
/// `apiKey` and `time`. The outbound query is those pairs in sorted order
/// followed by `apiSig`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    method_name: String,
    params: BTreeMap<String, String>,
    time: u64,
    rand: String,
    signature: String,
}

impl SignedRequest {
    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    pub fn time(&self) -> u64 {
        self.time
    }

    pub fn rand(&self) -> &str {
        &self.rand
    }

    /// `rand` followed by the hex digest; sent as `apiSig`.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .params
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        pairs.push(("apiSig".to_string(), self.signature.clone()));
        pairs
    }
}

/// Builds `apiSig` tokens for authenticated API methods.
pub struct SignatureBuilder<H = Sha512Hasher> {
    api_key: String,
    secret: String,
    hasher: H,
}

impl SignatureBuilder<Sha512Hasher> {
    pub fn new(api_key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self::with_hasher(api_key, secret, Sha512Hasher)
    }
}

impl<H: Hasher> SignatureBuilder<H> {
    pub fn with_hasher(api_key: impl Into<String>, secret: impl Into<String>, hasher: H) -> Self {
        Self {
            api_key: api_key.into(),
            secret: secret.into(),
            hasher,
        }
    }

    /// Signs with a fresh `rand` and the current time. The result goes stale
    /// once the server's clock moves past its `time` window.
    pub fn sign(&self, method_name: &str, params: BTreeMap<String, String>) -> SignedRequest {
        self.sign_with(method_name, params, random_token(), unix_now())
    }

    pub fn sign_with(
        &self,
        method_name: &str,
        mut params: BTreeMap<String, String>,
        rand: String,
        time: u64,
    ) -> SignedRequest {
        params.insert("apiKey".to_string(), self.api_key.clone());
        params.insert("time".to_string(), time.to_string());

        let to_hash = signature_string(&rand, method_name, &params, &self.secret);
        let signature = format!("{rand}{}", self.hasher.digest(to_hash.as_bytes()));

        SignedRequest {
            method_name: method_name.to_string(),
            params,
            time,
            rand,
            signature,
        }
    }
}

impl<H> fmt::Debug for SignatureBuilder<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignatureBuilder")
            .field("api_key", &self.api_key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// `key=value` pairs sorted byte-wise by key and joined with `&`.
pub fn sorted_params(params: &BTreeMap<String, String>) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// The exact text that gets hashed: `<rand>/<method>?<sorted params>#<secret>`.
pub fn signature_string(
    rand: &str,
    method_name: &str,
    params: &BTreeMap<String, String>,
    secret: &str,
) -> String {
    format!("{rand}/{method_name}?{}#{secret}", sorted_params(params))
}

/// Decimal rendering of `floor(1_000_000 * u)` for uniform `u` in `[0, 1)`.
/// Not a secret, only extra entropy for the hashed string.
pub fn random_token() -> String {
    let scaled = (rand::random::<f64>() * 1_000_000.0).floor() as u32;
    scaled.to_string()
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
