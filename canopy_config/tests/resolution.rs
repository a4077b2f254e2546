// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end resolution scenarios across nested provider scopes.

use canopy_config::{
    ComponentOverride, Csp, Direction, EffectiveConfig, Locale, PopupOverflow, ProviderConfig,
    ScopeTree, ThemeConfig, components, resolve,
};
use canopy_token::{AlgorithmError, TokenSet, TokenSetBuilder, schema};

/// Doubles the numeric `spacing` token, leaving everything else alone.
fn double_spacing(seed: &TokenSet) -> Result<TokenSet, AlgorithmError> {
    let spacing = seed.number(schema::SPACING).unwrap_or(0.0);
    Ok(seed.merged_with(
        &TokenSetBuilder::new()
            .set(schema::SPACING, spacing * 2.0)
            .build(),
    ))
}

#[test]
fn disjoint_fields_union_across_deep_chain() {
    let mut tree = ScopeTree::new();

    // Five scopes, each setting one disjoint field.
    let a = tree.insert(
        None,
        ProviderConfig::builder().direction(Direction::Rtl).build(),
    );
    let b = tree.insert(
        Some(a),
        ProviderConfig::builder().icon_prefix("brandicon").build(),
    );
    let c = tree.insert(
        Some(b),
        ProviderConfig::builder().virtual_scroll(false).build(),
    );
    let d = tree.insert(
        Some(c),
        ProviderConfig::builder()
            .popup_overflow(PopupOverflow::Scroll)
            .build(),
    );
    let e = tree.insert(
        Some(d),
        ProviderConfig::builder()
            .csp(Csp {
                nonce: Some("n0nce".into()),
            })
            .build(),
    );

    // The leaf observes the union of all explicit fields.
    let leaf = tree.effective(e).unwrap();
    assert_eq!(leaf.direction(), Direction::Rtl);
    assert_eq!(leaf.icon_prefix(), "brandicon");
    assert!(!leaf.virtual_scroll());
    assert_eq!(leaf.popup_overflow(), PopupOverflow::Scroll);
    assert_eq!(leaf.csp().unwrap().nonce.as_deref(), Some("n0nce"));
    // Untouched fields carry the library defaults all the way down.
    assert!(leaf.button_auto_insert_space());
}

#[test]
fn deepest_scope_wins_on_overlap() {
    let mut tree = ScopeTree::new();
    let outer = tree.insert(
        None,
        ProviderConfig::builder().direction(Direction::Rtl).build(),
    );
    let middle = tree.insert(
        Some(outer),
        ProviderConfig::builder().direction(Direction::Ltr).build(),
    );
    let inner = tree.insert(
        Some(middle),
        ProviderConfig::builder().direction(Direction::Rtl).build(),
    );

    assert_eq!(tree.effective(outer).unwrap().direction(), Direction::Rtl);
    assert_eq!(tree.effective(middle).unwrap().direction(), Direction::Ltr);
    assert_eq!(tree.effective(inner).unwrap().direction(), Direction::Rtl);
}

#[test]
fn empty_config_is_observationally_transparent() {
    let root = resolve(
        &EffectiveConfig::library_default(),
        &ProviderConfig::builder()
            .direction(Direction::Rtl)
            .theme(
                ThemeConfig::builder()
                    .token(schema::COLOR_PRIMARY, "#123123")
                    .build(),
            )
            .build(),
    )
    .unwrap();

    let child = resolve(&root, &ProviderConfig::empty()).unwrap();

    assert_eq!(child.direction(), root.direction());
    assert_eq!(child.icon_prefix(), root.icon_prefix());
    assert_eq!(child.locale(), root.locale());
    assert_eq!(child.theme().tokens(), root.theme().tokens());
    assert_eq!(child.theme().hash(), root.theme().hash());
    assert_eq!(child.overrides(), root.overrides());
    assert_eq!(child.virtual_scroll(), root.virtual_scroll());
    assert_eq!(child.popup_overflow(), root.popup_overflow());
    assert_eq!(
        child.prefix_cls(Some("button"), None),
        root.prefix_cls(Some("button"), None)
    );
}

#[test]
fn rtl_root_with_primary_color_child() {
    // Root sets direction only, child overrides one token.
    let mut tree = ScopeTree::new();
    let root = tree.insert(
        None,
        ProviderConfig::builder().direction(Direction::Rtl).build(),
    );
    let child = tree.insert(
        Some(root),
        ProviderConfig::builder()
            .theme(
                ThemeConfig::builder()
                    .token(schema::COLOR_PRIMARY, "#ff0000")
                    .build(),
            )
            .build(),
    );

    let root_effective = tree.effective(root).unwrap();
    let consumer = tree.consumer(child).unwrap();

    // Direction inherited, primary color overridden.
    assert_eq!(consumer.direction(), Direction::Rtl);
    assert_eq!(
        consumer.tokens().text(schema::COLOR_PRIMARY),
        Some("#ff0000")
    );

    // Every other token equals the root's derived value.
    for def in schema::ALIAS_TOKENS {
        if def.key == schema::COLOR_PRIMARY {
            continue;
        }
        assert_eq!(
            consumer.tokens().get(def.key),
            root_effective.theme().tokens().get(def.key),
            "token {} should be inherited",
            def.name
        );
    }
}

#[test]
fn component_overrides_merge_independently() {
    // Button override at the root, card override at the child; the child's
    // consumer sees both.
    let mut tree = ScopeTree::new();
    let root = tree.insert(
        None,
        ProviderConfig::builder()
            .override_for(
                components::BUTTON,
                ComponentOverride::builder().class_name("a").build(),
            )
            .build(),
    );
    let child = tree.insert(
        Some(root),
        ProviderConfig::builder()
            .override_for(
                components::CARD,
                ComponentOverride::builder().class_name("b").build(),
            )
            .build(),
    );

    let consumer = tree.consumer(child).unwrap();
    assert_eq!(
        consumer
            .component_override(components::BUTTON)
            .unwrap()
            .class_name(),
        Some("a")
    );
    assert_eq!(
        consumer
            .component_override(components::CARD)
            .unwrap()
            .class_name(),
        Some("b")
    );
}

#[test]
fn inherit_false_reseeds_tokens_but_keeps_other_channels() {
    // The root inflates spacing; the child opts out of token inheritance
    // and doubles spacing from the *base seed*.
    let mut tree = ScopeTree::new();
    let root = tree.insert(
        None,
        ProviderConfig::builder()
            .direction(Direction::Rtl)
            .locale(Locale {
                empty_text: Some("Nothing here".into()),
                ..Locale::default()
            })
            .theme(
                ThemeConfig::builder()
                    .token(schema::SPACING, 100.0)
                    .build(),
            )
            .build(),
    );
    let child = tree.insert(
        Some(root),
        ProviderConfig::builder()
            .theme(
                ThemeConfig::builder()
                    .inherit(false)
                    .algorithm(double_spacing)
                    .build(),
            )
            .build(),
    );

    let consumer = tree.consumer(child).unwrap();

    // algorithm(base_seed.spacing), not algorithm(root.derived.spacing).
    let base_spacing = schema::seed().number(schema::SPACING).unwrap();
    assert_eq!(
        consumer.tokens().number(schema::SPACING),
        Some(base_spacing * 2.0)
    );

    // Non-theme channels still inherit normally.
    assert_eq!(consumer.direction(), Direction::Rtl);
    assert_eq!(
        consumer.locale().empty_text.as_deref(),
        Some("Nothing here")
    );
}

#[test]
fn inherit_true_feeds_ancestor_resolved_tokens_to_algorithm() {
    // Contrast case: with inheritance on, the same algorithm doubles the
    // ancestor's resolved spacing.
    let mut tree = ScopeTree::new();
    let root = tree.insert(
        None,
        ProviderConfig::builder()
            .theme(
                ThemeConfig::builder()
                    .token(schema::SPACING, 100.0)
                    .build(),
            )
            .build(),
    );
    let child = tree.insert(
        Some(root),
        ProviderConfig::builder()
            .theme(ThemeConfig::builder().algorithm(double_spacing).build())
            .build(),
    );

    let consumer = tree.consumer(child).unwrap();
    assert_eq!(consumer.tokens().number(schema::SPACING), Some(200.0));
}

#[test]
fn theme_hashes_agree_for_equal_themes_and_differ_otherwise() {
    let mut tree = ScopeTree::new();
    let red = ThemeConfig::builder()
        .token(schema::COLOR_PRIMARY, "#ff0000")
        .build();

    let a = tree.insert(None, ProviderConfig::builder().theme(red.clone()).build());
    let b = tree.insert(None, ProviderConfig::builder().theme(red).build());
    let c = tree.insert(
        None,
        ProviderConfig::builder()
            .theme(
                ThemeConfig::builder()
                    .token(schema::COLOR_PRIMARY, "#00ff00")
                    .build(),
            )
            .build(),
    );

    let hash_a = tree.effective(a).unwrap().theme().hash().to_owned();
    let hash_b = tree.effective(b).unwrap().theme().hash().to_owned();
    let hash_c = tree.effective(c).unwrap().theme().hash().to_owned();

    // Identical inputs, identical hash: safe class-name reuse across
    // sibling subtrees.
    assert_eq!(hash_a, hash_b);
    assert_ne!(hash_a, hash_c);
}

#[test]
fn recommit_reresolves_only_the_affected_subtree() {
    let mut tree = ScopeTree::new();
    let root = tree.insert(None, ProviderConfig::empty());
    let themed = tree.insert(
        Some(root),
        ProviderConfig::builder()
            .theme(
                ThemeConfig::builder()
                    .token(schema::COLOR_PRIMARY, "#111111")
                    .build(),
            )
            .build(),
    );
    let sibling = tree.insert(Some(root), ProviderConfig::empty());

    let sibling_before = tree.effective(sibling).unwrap();
    let themed_before = tree.effective(themed).unwrap();

    tree.set_config(
        themed,
        ProviderConfig::builder()
            .theme(
                ThemeConfig::builder()
                    .token(schema::COLOR_PRIMARY, "#222222")
                    .build(),
            )
            .build(),
    );

    // The sibling's cached record identity is untouched.
    let sibling_after = tree.effective(sibling).unwrap();
    assert!(sibling_before.ptr_eq(&sibling_after));

    // The themed subtree re-resolved to a fresh record with the new value.
    let themed_after = tree.effective(themed).unwrap();
    assert!(!themed_before.ptr_eq(&themed_after));
    assert_eq!(
        themed_after.theme().tokens().text(schema::COLOR_PRIMARY),
        Some("#222222")
    );
}

#[test]
fn locale_falls_back_field_by_field_to_nearest_ancestor() {
    let mut tree = ScopeTree::new();
    let root = tree.insert(
        None,
        ProviderConfig::builder()
            .locale(Locale {
                empty_text: Some("Leer".into()),
                code: Some("de-DE".into()),
                ..Locale::default()
            })
            .build(),
    );
    let child = tree.insert(
        Some(root),
        ProviderConfig::builder()
            .locale(Locale {
                empty_text: Some("Vide".into()),
                ..Locale::default()
            })
            .build(),
    );

    let locale = tree.consumer(child).unwrap().locale().clone();
    // Child's explicit field wins.
    assert_eq!(locale.empty_text.as_deref(), Some("Vide"));
    // Unset field falls back to the nearest ancestor that set it.
    assert_eq!(locale.code.as_deref(), Some("de-DE"));
    // Fields no provider set keep the library defaults.
    assert_eq!(
        locale.modal.unwrap().ok_text.as_deref(),
        Some("OK")
    );
}
