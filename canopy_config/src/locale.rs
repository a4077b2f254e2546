// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Locale bundles.
//!
//! A [`Locale`] is a partial, structured bundle of user-visible strings.
//! Unlike the scalar configuration fields (which inherit wholesale), locale
//! resolution falls back *field by field*: a provider supplying only a modal
//! `ok_text` still inherits every other string from the nearest ancestor,
//! and ultimately from the library's English bundle. A missing field never
//! fails resolution.
//!
//! Full string tables live outside this crate; this is only the structural
//! bundle configuration resolution carries.

use alloc::string::String;

/// Strings for modal dialogs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModalLocale {
    /// Confirm button label.
    pub ok_text: Option<String>,
    /// Cancel button label.
    pub cancel_text: Option<String>,
    /// Label of the single button on info-only dialogs.
    pub just_ok_text: Option<String>,
}

impl ModalLocale {
    fn merged_over(&self, ancestor: &Self) -> Self {
        Self {
            ok_text: self.ok_text.clone().or_else(|| ancestor.ok_text.clone()),
            cancel_text: self
                .cancel_text
                .clone()
                .or_else(|| ancestor.cancel_text.clone()),
            just_ok_text: self
                .just_ok_text
                .clone()
                .or_else(|| ancestor.just_ok_text.clone()),
        }
    }
}

/// Strings for pagination controls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PaginationLocale {
    /// Suffix of the page-size selector.
    pub items_per_page: Option<String>,
    /// Label of the jump-to-page input.
    pub jump_to: Option<String>,
    /// Word for "page" in composed labels.
    pub page: Option<String>,
}

impl PaginationLocale {
    fn merged_over(&self, ancestor: &Self) -> Self {
        Self {
            items_per_page: self
                .items_per_page
                .clone()
                .or_else(|| ancestor.items_per_page.clone()),
            jump_to: self.jump_to.clone().or_else(|| ancestor.jump_to.clone()),
            page: self.page.clone().or_else(|| ancestor.page.clone()),
        }
    }
}

/// A partial locale bundle.
///
/// # Example
///
/// ```rust
/// use canopy_config::{Locale, ModalLocale};
///
/// // A provider overriding one string; everything else falls through.
/// let partial = Locale {
///     modal: Some(ModalLocale {
///         ok_text: Some("Aye".into()),
///         ..ModalLocale::default()
///     }),
///     ..Locale::default()
/// };
///
/// let resolved = partial.merged_over(&Locale::english());
/// let modal = resolved.modal.unwrap();
/// assert_eq!(modal.ok_text.as_deref(), Some("Aye"));
/// assert_eq!(modal.cancel_text.as_deref(), Some("Cancel"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Locale {
    /// BCP 47 locale code, e.g. `en-US`.
    pub code: Option<String>,
    /// Text shown by empty-state placeholders.
    pub empty_text: Option<String>,
    /// Modal dialog strings.
    pub modal: Option<ModalLocale>,
    /// Pagination strings.
    pub pagination: Option<PaginationLocale>,
}

impl Locale {
    /// Returns the library's default English bundle, fully populated.
    #[must_use]
    pub fn english() -> Self {
        Self {
            code: Some(String::from("en-US")),
            empty_text: Some(String::from("No data")),
            modal: Some(ModalLocale {
                ok_text: Some(String::from("OK")),
                cancel_text: Some(String::from("Cancel")),
                just_ok_text: Some(String::from("OK")),
            }),
            pagination: Some(PaginationLocale {
                items_per_page: Some(String::from("/ page")),
                jump_to: Some(String::from("Go to")),
                page: Some(String::from("Page")),
            }),
        }
    }

    /// Returns `self` merged over `ancestor`, field by field.
    ///
    /// Sections recurse: a partial [`ModalLocale`] inherits the ancestor's
    /// values for its unset fields rather than replacing the section.
    #[must_use]
    pub fn merged_over(&self, ancestor: &Self) -> Self {
        Self {
            code: self.code.clone().or_else(|| ancestor.code.clone()),
            empty_text: self
                .empty_text
                .clone()
                .or_else(|| ancestor.empty_text.clone()),
            modal: match (&self.modal, &ancestor.modal) {
                (Some(child), Some(parent)) => Some(child.merged_over(parent)),
                (Some(child), None) => Some(child.clone()),
                (None, parent) => parent.clone(),
            },
            pagination: match (&self.pagination, &ancestor.pagination) {
                (Some(child), Some(parent)) => Some(child.merged_over(parent)),
                (Some(child), None) => Some(child.clone()),
                (None, parent) => parent.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn english_is_fully_populated() {
        let en = Locale::english();
        assert!(en.code.is_some());
        assert!(en.empty_text.is_some());
        let modal = en.modal.unwrap();
        assert!(modal.ok_text.is_some() && modal.cancel_text.is_some());
        let pagination = en.pagination.unwrap();
        assert!(pagination.items_per_page.is_some() && pagination.jump_to.is_some());
    }

    #[test]
    fn empty_inherits_everything() {
        let resolved = Locale::default().merged_over(&Locale::english());
        assert_eq!(resolved, Locale::english());
    }

    #[test]
    fn partial_section_falls_back_per_field() {
        let partial = Locale {
            modal: Some(ModalLocale {
                cancel_text: Some("Abbrechen".to_string()),
                ..ModalLocale::default()
            }),
            ..Locale::default()
        };

        let resolved = partial.merged_over(&Locale::english());
        let modal = resolved.modal.unwrap();
        assert_eq!(modal.cancel_text.as_deref(), Some("Abbrechen"));
        assert_eq!(modal.ok_text.as_deref(), Some("OK"));
        // Untouched sections inherit wholesale.
        assert_eq!(resolved.pagination, Locale::english().pagination);
    }

    #[test]
    fn child_code_wins() {
        let child = Locale {
            code: Some("de-DE".to_string()),
            ..Locale::default()
        };
        let resolved = child.merged_over(&Locale::english());
        assert_eq!(resolved.code.as_deref(), Some("de-DE"));
        assert_eq!(resolved.empty_text.as_deref(), Some("No data"));
    }
}
