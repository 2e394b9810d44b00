//! Cache key derivation for GET requests

use sha2::{Digest, Sha256};

/// Derives the cache key for a GET of `url` with query `params`
///
/// Parameters are sorted before hashing, so the same set of pairs in any order
/// yields the same key. An empty list and no list at all are the same request.
/// Every component is length-prefixed, which keeps `("a", "b=c")` and
/// `("a=b", "c")` from colliding.
pub fn cache_key(url: &str, params: &[(String, String)]) -> String {
    let mut sorted: Vec<&(String, String)> = params.iter().collect();
    sorted.sort();

    let mut hasher = Sha256::new();
    update_component(&mut hasher, url);
    for (name, value) in sorted {
        update_component(&mut hasher, name);
        update_component(&mut hasher, value);
    }

    format!("{:x}", hasher.finalize())
}

fn update_component(hasher: &mut Sha256, component: &str) {
    hasher.update((component.len() as u64).to_be_bytes());
    hasher.update(component.as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_key_is_deterministic() {
        let p = params(&[("action", "load"), ("keys", "a,b")]);

        assert_eq!(cache_key("https://api.test/v1", &p), cache_key("https://api.test/v1", &p));
    }

    #[test]
    fn test_param_order_does_not_matter() {
        let forward = params(&[("action", "load"), ("ttl", "300"), ("collection", "movies")]);
        let shuffled = params(&[("collection", "movies"), ("action", "load"), ("ttl", "300")]);

        assert_eq!(cache_key("https://api.test", &forward), cache_key("https://api.test", &shuffled));
    }

    #[test]
    fn test_different_param_value_changes_key() {
        let a = params(&[("keys", "a,b")]);
        let b = params(&[("keys", "a,c")]);

        assert_ne!(cache_key("https://api.test", &a), cache_key("https://api.test", &b));
    }

    #[test]
    fn test_different_url_changes_key() {
        let p = params(&[("keys", "a")]);

        assert_ne!(cache_key("https://api.test/one", &p), cache_key("https://api.test/two", &p));
    }

    #[test]
    fn test_empty_params_have_a_single_canonical_key() {
        let empty: Vec<(String, String)> = Vec::new();

        assert_eq!(cache_key("https://api.test", &empty), cache_key("https://api.test", &[]));
        assert_ne!(
            cache_key("https://api.test", &[]),
            cache_key("https://api.test", &params(&[("a", "")]))
        );
    }

    #[test]
    fn test_separator_characters_do_not_collide() {
        let left = params(&[("a", "b=c")]);
        let right = params(&[("a=b", "c")]);

        assert_ne!(cache_key("u", &left), cache_key("u", &right));
    }

    #[test]
    fn test_key_is_hex_sha256() {
        let key = cache_key("https://api.test", &[]);

        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
