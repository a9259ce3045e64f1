// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Origin formatting for security display.
//
// The selection sheet shows the user *where* a credential will be filled.
// For http(s) origins the scheme is dropped and only host (plus any
// non-default port) is shown; other schemes keep their prefix so that an
// app-linked origin like `android://com.example` stays distinguishable
// from a web one.

use url::Url;

use crate::error::{Result, TapfillError};

/// Format a raw origin URL for display in the selection sheet.
///
/// ```
/// # use tapfill_core::origin::format_for_display;
/// assert_eq!(format_for_display("https://www.example.xyz/login").unwrap(), "www.example.xyz");
/// assert_eq!(format_for_display("https://example.org:8443/").unwrap(), "example.org:8443");
/// ```
pub fn format_for_display(raw: &str) -> Result<String> {
    let parsed = Url::parse(raw).map_err(|e| TapfillError::InvalidOrigin(e.to_string()))?;

    let host = parsed
        .host_str()
        .ok_or_else(|| TapfillError::InvalidOrigin(format!("no host in {raw}")))?;

    // `Url::port` is None for scheme-default ports, which is exactly the
    // omission rule wanted here.
    let display = match parsed.scheme() {
        "http" | "https" => match parsed.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_owned(),
        },
        scheme => format!("{scheme}://{host}"),
    };

    Ok(display)
}
