/// Value of `name` in a URL query string (`?a=1&b=2`, leading `?` optional).
pub fn query_param<'a>(search: &'a str, name: &str) -> Option<&'a str> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v)
}

/// `?seed=<u64>` pins the field layout for a reproducible session.
pub fn seed_from_query(search: &str) -> Option<u64> {
    query_param(search, "seed")?.parse().ok()
}
