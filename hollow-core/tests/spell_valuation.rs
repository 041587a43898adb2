//! Properties of spell cost and name generation.

use hollow_core::spell::spell_cost;
use hollow_core::{generate_spell_name, AreaShape, DamageType, Effect, Spell, SpellArgs};

fn base() -> SpellArgs {
    SpellArgs::new(AreaShape::Cone)
        .with_radius_or_depth(2.0)
        .with_range(5.0)
        .with_duration(1.0)
        .with_damage_type(DamageType::Ice)
        .with_effect(Effect::Slow)
}

#[test]
fn test_cost_strictly_increases_with_damage() {
    let mut previous = spell_cost(&base());
    for damage in 1..=300 {
        let cost = spell_cost(&base().with_damage(damage));
        assert!(cost > previous, "damage {damage}: {cost} <= {previous}");
        previous = cost;
    }
}

#[test]
fn test_appending_damage_type_raises_cost() {
    let before = spell_cost(&base());
    for damage_type in DamageType::ALL.iter().skip(1) {
        let after = spell_cost(&base().with_damage_type(*damage_type));
        assert!(after > before, "{damage_type:?} did not raise the cost");
    }
}

#[test]
fn test_cost_and_name_are_pure() {
    let spell = Spell::new(base().with_damage(33)).unwrap();
    let again = Spell::new(base().with_damage(33)).unwrap();
    assert_eq!(spell.cost(), again.cost());
    assert_eq!(spell.name(), again.name());
    assert_eq!(spell.cost(), spell.cost());
    assert_eq!(spell, again);
}

#[test]
fn test_list_order_changes_name_not_cost() {
    let mut ice_ice_fire = base();
    ice_ice_fire.damage_types = vec![DamageType::Ice, DamageType::Ice, DamageType::Fire];
    let mut ice_fire_ice = base();
    ice_fire_ice.damage_types = vec![DamageType::Ice, DamageType::Fire, DamageType::Ice];

    // The positional surcharge depends only on list length.
    assert_eq!(spell_cost(&ice_ice_fire), spell_cost(&ice_fire_ice));

    let a = Spell::new(ice_ice_fire).unwrap();
    let b = Spell::new(ice_fire_ice).unwrap();
    assert_ne!(a.name(), b.name());
    assert!(a.name().ends_with("Frost Frost Fire Wave of Snare"));
    assert!(b.name().ends_with("Frost Fire Frost Wave of Snare"));
}

#[test]
fn test_damage_descriptor_buckets() {
    let cases = [
        (0, "Weak"),
        (19, "Weak"),
        (40, "Moderate"),
        (59, "Moderate"),
        (60, "Powerful"),
        (80, "Devastating"),
        (100, "Cataclysmic"),
        (1000, "Cataclysmic"),
        (u32::MAX, "Cataclysmic"),
    ];
    for (damage, expected) in cases {
        let name = generate_spell_name(damage, 0, &[], &[], AreaShape::Projectile);
        assert_eq!(name, format!("{expected} Minor Bolt"), "damage {damage}");
    }

    // The 20..=39 bucket has a blank descriptor.
    for damage in [20, 39] {
        let name = generate_spell_name(damage, 0, &[], &[], AreaShape::Projectile);
        assert_eq!(name, "Minor Bolt");
    }
}

#[test]
fn test_cost_descriptor_buckets() {
    let cases = [
        (0, "Minor"),
        (19, "Minor"),
        (20, "Lesser"),
        (39, "Lesser"),
        (40, "Greater"),
        (60, "Grand"),
        (80, "Supreme"),
        (5000, "Supreme"),
    ];
    for (cost, expected) in cases {
        let name = generate_spell_name(0, cost, &[DamageType::Poison], &[], AreaShape::Sphere);
        assert_eq!(name, format!("Weak {expected} Venom Ball"), "cost {cost}");
    }
}

#[test]
fn test_full_name_shape() {
    let name = generate_spell_name(
        45,
        61,
        &[DamageType::Necrotic, DamageType::True],
        &[Effect::Drain, Effect::Teleport],
        AreaShape::Cylinder,
    );
    assert_eq!(name, "Moderate Grand Dark Eldritch Column of Leech and Blink");
}

#[test]
fn test_spell_builder_roundtrip_fields() {
    let spell = Spell::new(
        SpellArgs::new(AreaShape::Box)
            .with_radius_or_depth(2.0)
            .with_height(3.0)
            .with_width(4.0)
            .with_damage(12),
    )
    .unwrap();
    // (1 + 4 * (2 + 3 + 4)) * 1.5 = 55.5, 12^1.15 ~ 17.42
    assert_eq!(spell.cost(), 72);
    assert_eq!(spell.area_shape(), AreaShape::Box);
    assert_eq!(spell.damage(), 12);
    assert_eq!(spell.to_string(), "Weak Grand Zone");
}
