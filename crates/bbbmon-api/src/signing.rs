//! BBB API request signing.
//!
//! Every administrative call carries a checksum the server recomputes to
//! authenticate the request. The checksum is the SHA-1 hex digest of the
//! byte concatenation `action + query_string + secret`, with no
//! separators. The query string that is hashed must be byte-identical to
//! the one sent on the wire, so both come from the same encoder.

use ring::digest;
use url::form_urlencoded;

/// Builds checksum-authenticated URLs against a fixed API base.
///
/// Pure: the same (action, params) always produces the same URL.
#[derive(Debug, Clone)]
pub struct UrlSigner {
    base_url: String,
    secret: String,
}

impl UrlSigner {
    /// Create a signer for the given API base URL and shared secret.
    pub fn new(base_url: impl Into<String>, secret: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            secret: secret.into(),
        }
    }

    /// Build a fully-qualified API URL for `action`.
    ///
    /// Parameters are encoded in caller order; the order is part of the
    /// signed payload and must match what the server will see.
    pub fn build(&self, action: &str, params: &[(&str, &str)]) -> String {
        let query = encode_query(params);
        let checksum = self.checksum(action, &query);
        if query.is_empty() {
            format!("{}/{}?checksum={}", self.base_url, action, checksum)
        } else {
            format!("{}/{}?{}&checksum={}", self.base_url, action, query, checksum)
        }
    }

    /// SHA-1 hex digest over `action + query + secret`.
    fn checksum(&self, action: &str, query: &str) -> String {
        let src = format!("{}{}{}", action, query, self.secret);
        let digest = digest::digest(&digest::SHA1_FOR_LEGACY_USE_ONLY, src.as_bytes());
        hex::encode(digest)
    }
}

/// Serialize parameters as application/x-www-form-urlencoded, preserving
/// caller order. Spaces encode as `+`, matching the server's decoder.
fn encode_query(params: &[(&str, &str)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_known_vector() {
        // sha1("getMeetings" + "" + "s3cr3t")
        let signer = UrlSigner::new("https://bbb.example.com/bigbluebutton/api", "s3cr3t");
        let url = signer.build("getMeetings", &[]);
        assert_eq!(
            url,
            "https://bbb.example.com/bigbluebutton/api/getMeetings\
             ?checksum=46cf608d2b96da8e287911640412c8a08d0ee33e"
        );
    }

    #[test]
    fn test_checksum_with_params() {
        // sha1("end" + "meetingID=room1&password=modpw" + "s3cr3t")
        let signer = UrlSigner::new("https://bbb.example.com/bigbluebutton/api", "s3cr3t");
        let url = signer.build("end", &[("meetingID", "room1"), ("password", "modpw")]);
        assert_eq!(
            url,
            "https://bbb.example.com/bigbluebutton/api/end\
             ?meetingID=room1&password=modpw\
             &checksum=0a1f5657d1984738cbc13ea7550ddc522c070948"
        );
    }

    #[test]
    fn test_spaces_encode_as_plus() {
        let signer = UrlSigner::new("https://bbb.example.com/api", "s3cr3t");
        let url = signer.build(
            "join",
            &[
                ("fullName", "Class Observer"),
                ("meetingID", "room1"),
                ("password", "viewpw"),
                ("redirect", "true"),
                ("listenOnly", "true"),
            ],
        );
        assert!(url.contains(
            "join?fullName=Class+Observer&meetingID=room1&password=viewpw\
             &redirect=true&listenOnly=true"
        ));
        // sha1("join" + query + "s3cr3t"), cross-checked against the
        // server-side implementation
        assert!(url.ends_with("&checksum=2f616b3bf2ac30b501e328e671cfdd3ababdcfc5"));
    }

    #[test]
    fn test_checksum_is_deterministic() {
        let signer = UrlSigner::new("https://bbb.example.com/api", "secret");
        let a = signer.build("getMeetings", &[("meetingID", "x")]);
        let b = signer.build("getMeetings", &[("meetingID", "x")]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_checksum_sensitive_to_each_input() {
        let signer = UrlSigner::new("https://bbb.example.com/api", "secret");
        let other_secret = UrlSigner::new("https://bbb.example.com/api", "secret2");

        let base_url = signer.build("end", &[("meetingID", "room1")]);
        let changed_action_url = signer.build("join", &[("meetingID", "room1")]);
        let changed_params_url = signer.build("end", &[("meetingID", "room2")]);
        let changed_secret_url = other_secret.build("end", &[("meetingID", "room1")]);

        let base = checksum_of(&base_url);
        let changed_action = checksum_of(&changed_action_url);
        let changed_params = checksum_of(&changed_params_url);
        let changed_secret = checksum_of(&changed_secret_url);

        assert_ne!(base, changed_action);
        assert_ne!(base, changed_params);
        assert_ne!(base, changed_secret);
    }

    #[test]
    fn test_param_order_changes_checksum() {
        let signer = UrlSigner::new("https://bbb.example.com/api", "secret");
        let ab_url = signer.build("end", &[("a", "1"), ("b", "2")]);
        let ba_url = signer.build("end", &[("b", "2"), ("a", "1")]);
        let ab = checksum_of(&ab_url);
        let ba = checksum_of(&ba_url);
        assert_ne!(ab, ba);
    }

    #[test]
    fn test_trailing_slash_stripped_from_base() {
        let signer = UrlSigner::new("https://bbb.example.com/api/", "secret");
        let url = signer.build("getMeetings", &[]);
        assert!(url.starts_with("https://bbb.example.com/api/getMeetings?"));
    }

    fn checksum_of(url: &str) -> &str {
        url.rsplit("checksum=").next().unwrap()
    }
}
