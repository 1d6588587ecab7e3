// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! README badge metadata.
//!
//! Badge URLs keep their `{{{USER}}}` and `{{{PKG}}}` placeholders. The
//! rendering engine substitutes them together with the rest of the README,
//! so nothing here knows the final owner or package name.

use std::fmt;

use serde::Serialize;

/// Label, image URL template and link URL template of a README badge.
///
/// # Examples
///
/// ```
/// use pkgci::Badge;
///
/// let badge = Badge::new("Build Status", "https://ci/{{{PKG}}}.svg", "https://ci/{{{PKG}}}");
/// assert_eq!(
///     badge.markdown(),
///     "[![Build Status](https://ci/{{{PKG}}}.svg)](https://ci/{{{PKG}}})"
/// );
/// ```
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Badge {
    /// Hover text of the badge.
    pub label: &'static str,
    /// Image URL template.
    pub image: &'static str,
    /// Link URL template.
    pub link:  &'static str
}

impl Badge {
    /// Creates a badge from static templates.
    pub const fn new(label: &'static str, image: &'static str, link: &'static str) -> Self {
        Self {
            label,
            image,
            link
        }
    }

    /// Formats the badge as a markdown image link.
    pub fn markdown(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[![{}]({})]({})", self.label, self.image, self.link)
    }
}
