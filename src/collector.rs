//! Session collection: store enumeration, name decoding and host filtering.

use percent_encoding::percent_decode_str;
use putty_sessions_store::{HOST_NAME_FIELD, Namespace, SessionStore, StoreError, child_path};
use std::collections::BTreeMap;

/// Decoded session name -> host.
pub type SessionCollection = BTreeMap<String, String>;

/// Hosts must be longer than this many bytes to be exported.
pub const MIN_HOST_LEN: usize = 1;

/// Knobs for [`collect_sessions`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectOptions {
    /// Treat a missing `HostName` value as empty instead of failing.
    pub skip_missing_host: bool,
}

/// Enumerate the sessions under `root` and collect the ones with a usable host.
///
/// Every namespace opened here is closed before returning, including on
/// error paths. The first error aborts the collection.
pub fn collect_sessions(
    store: &dyn SessionStore,
    root: &str,
    options: CollectOptions,
) -> Result<SessionCollection, StoreError> {
    let namespace = store.open_namespace(root)?;
    let collected = collect_children(store, namespace.as_ref(), options);
    let closed = namespace.close();
    let sessions = collected?;
    closed?;
    Ok(sessions)
}

fn collect_children(
    store: &dyn SessionStore,
    parent: &dyn Namespace,
    options: CollectOptions,
) -> Result<SessionCollection, StoreError> {
    let mut sessions = SessionCollection::new();

    for encoded in parent.list_children()? {
        let host = read_host(store, &child_path(parent.path(), &encoded), options)?;
        let name = decode_session_name(&encoded);

        if has_usable_host(&host) {
            if let Some(previous) = sessions.insert(name.clone(), host) {
                log::debug!("session '{name}' decoded more than once, replacing host '{previous}'");
            }
        } else {
            log::debug!("skipping session '{name}': no usable host");
        }
    }

    Ok(sessions)
}

fn read_host(
    store: &dyn SessionStore,
    path: &str,
    options: CollectOptions,
) -> Result<String, StoreError> {
    let namespace = store.open_namespace(path)?;
    let host = match namespace.read_field(HOST_NAME_FIELD) {
        Err(e) if options.skip_missing_host && e.is_field_not_found() => {
            log::warn!("{e}; skipping");
            Ok(String::new())
        }
        other => other,
    };
    let closed = namespace.close();
    let host = host?;
    closed?;
    Ok(host)
}

/// Decode a percent-escaped session key name (`my%20server` -> `my server`).
///
/// Only `%XX` escapes are decoded; `+` is left alone since PuTTY does not
/// escape it. Invalid escapes are kept literally. Both differ on purpose from
/// Go's `url.QueryUnescape`, which the original tool used.
pub fn decode_session_name(encoded: &str) -> String {
    percent_decode_str(encoded).decode_utf8_lossy().into_owned()
}

/// True when `host` is long enough to be exported.
pub fn has_usable_host(host: &str) -> bool {
    host.len() > MIN_HOST_LEN
}
