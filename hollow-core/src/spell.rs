//! Player-authored spells and their valuation.
//!
//! A [`Spell`] is built once from [`SpellArgs`] and never changes. Its mana
//! cost and display name are derived on demand from the declared shape.
//!
//! The position of every tag inside its enumeration feeds the cost formula,
//! so the variant order of [`AreaShape`], [`DamageType`] and [`Effect`] is
//! part of game balance and must not be reordered.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error type for invalid spell arguments.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpellError {
    #[error("Spell {field} must not be negative (got {value})")]
    NegativeValue { field: &'static str, value: f64 },
    #[error("Spell {field} must be a finite number")]
    NotFinite { field: &'static str },
}

/// Geometric delivery pattern of a spell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AreaShape {
    Projectile,
    Sphere,
    Cylinder,
    Cone,
    Box,
    Target,
}

impl AreaShape {
    pub const ALL: [AreaShape; 6] = [
        AreaShape::Projectile,
        AreaShape::Sphere,
        AreaShape::Cylinder,
        AreaShape::Cone,
        AreaShape::Box,
        AreaShape::Target,
    ];

    /// Position within the balance table.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Noun closing a generated spell name.
    pub fn noun(&self) -> &'static str {
        match self {
            AreaShape::Projectile => "Bolt",
            AreaShape::Sphere => "Ball",
            AreaShape::Cylinder => "Column",
            AreaShape::Cone => "Wave",
            AreaShape::Box => "Zone",
            AreaShape::Target => "Touch",
        }
    }
}

/// Damage types a spell can deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageType {
    None,
    Slashing,
    Bludgeoning,
    Piercing,
    Fire,
    Ice,
    Electric,
    Thunder,
    Psychic,
    Force,
    Poison,
    Acid,
    Necrotic,
    True,
    Special,
}

impl DamageType {
    pub const ALL: [DamageType; 15] = [
        DamageType::None,
        DamageType::Slashing,
        DamageType::Bludgeoning,
        DamageType::Piercing,
        DamageType::Fire,
        DamageType::Ice,
        DamageType::Electric,
        DamageType::Thunder,
        DamageType::Psychic,
        DamageType::Force,
        DamageType::Poison,
        DamageType::Acid,
        DamageType::Necrotic,
        DamageType::True,
        DamageType::Special,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Word this damage type contributes to a spell name.
    pub fn prefix(&self) -> &'static str {
        match self {
            DamageType::None => "Mystic",
            DamageType::Slashing => "Blade",
            DamageType::Bludgeoning => "Hammer",
            DamageType::Piercing => "Spike",
            DamageType::Fire => "Fire",
            DamageType::Ice => "Frost",
            DamageType::Electric => "Storm",
            DamageType::Thunder => "Thunder",
            DamageType::Psychic => "Mind",
            DamageType::Force => "Arcane",
            DamageType::Poison => "Venom",
            DamageType::Acid => "Corrosive",
            DamageType::Necrotic => "Dark",
            DamageType::True => "Eldritch",
            DamageType::Special => "Unknown",
        }
    }
}

/// Secondary effects a spell can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    None,
    Light,
    LifeRegen,
    Push,
    Pull,
    Slow,
    Stun,
    Silence,
    Blind,
    Deaf,
    Weaken,
    Confuse,
    Drain,
    SpeedBoost,
    DamageBoost,
    Protection,
    AttackSpeedBoost,
    Reflect,
    Teleport,
    StaminaRegen,
    ManaRegen,
}

impl Effect {
    pub const ALL: [Effect; 21] = [
        Effect::None,
        Effect::Light,
        Effect::LifeRegen,
        Effect::Push,
        Effect::Pull,
        Effect::Slow,
        Effect::Stun,
        Effect::Silence,
        Effect::Blind,
        Effect::Deaf,
        Effect::Weaken,
        Effect::Confuse,
        Effect::Drain,
        Effect::SpeedBoost,
        Effect::DamageBoost,
        Effect::Protection,
        Effect::AttackSpeedBoost,
        Effect::Reflect,
        Effect::Teleport,
        Effect::StaminaRegen,
        Effect::ManaRegen,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Word appended after "of" in a spell name. Empty for [`Effect::None`].
    pub fn suffix(&self) -> &'static str {
        match self {
            Effect::None => "",
            Effect::Light => "Radiance",
            Effect::LifeRegen => "Healing",
            Effect::Push => "Repulsion",
            Effect::Pull => "Attraction",
            Effect::Slow => "Snare",
            Effect::Stun => "Paralysis",
            Effect::Silence => "Mute",
            Effect::Blind => "Blindness",
            Effect::Deaf => "Echo",
            Effect::Weaken => "Sapping",
            Effect::Confuse => "Madness",
            Effect::Drain => "Leech",
            Effect::SpeedBoost => "Swiftness",
            Effect::DamageBoost => "Empowerment",
            Effect::Protection => "Barrier",
            Effect::AttackSpeedBoost => "Frenzy",
            Effect::Reflect => "Mirror",
            Effect::Teleport => "Blink",
            Effect::StaminaRegen => "Vigor",
            Effect::ManaRegen => "Mana Surge",
        }
    }
}

/// Damage intensity words, indexed by `damage / 20`.
const DAMAGE_DESCRIPTORS: [&str; 6] = [
    "Weak",
    "",
    "Moderate",
    "Powerful",
    "Devastating",
    "Cataclysmic",
];

/// Cost intensity words, indexed by `cost / 20`.
const COST_DESCRIPTORS: [&str; 5] = ["Minor", "Lesser", "Greater", "Grand", "Supreme"];

/// Width of one descriptor bucket.
const DESCRIPTOR_STEP: u32 = 20;

/// Authored parameters of a spell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellArgs {
    pub area_shape: AreaShape,
    pub area_radius_or_depth: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_width: Option<f64>,
    /// Reach of the spell. Zero means self-cast.
    pub range: f64,
    pub duration: f64,
    pub damage: u32,
    #[serde(default)]
    pub damage_types: Vec<DamageType>,
    #[serde(default)]
    pub effects: Vec<Effect>,
}

impl SpellArgs {
    /// Start from a shape with every other field empty.
    pub fn new(area_shape: AreaShape) -> Self {
        Self {
            area_shape,
            area_radius_or_depth: 0.0,
            area_height: None,
            area_width: None,
            range: 0.0,
            duration: 0.0,
            damage: 0,
            damage_types: Vec::new(),
            effects: Vec::new(),
        }
    }

    pub fn with_radius_or_depth(mut self, value: f64) -> Self {
        self.area_radius_or_depth = value;
        self
    }

    pub fn with_height(mut self, value: f64) -> Self {
        self.area_height = Some(value);
        self
    }

    pub fn with_width(mut self, value: f64) -> Self {
        self.area_width = Some(value);
        self
    }

    pub fn with_range(mut self, value: f64) -> Self {
        self.range = value;
        self
    }

    pub fn with_duration(mut self, value: f64) -> Self {
        self.duration = value;
        self
    }

    pub fn with_damage(mut self, damage: u32) -> Self {
        self.damage = damage;
        self
    }

    pub fn with_damage_type(mut self, damage_type: DamageType) -> Self {
        self.damage_types.push(damage_type);
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    fn validate(&self) -> Result<(), SpellError> {
        check_measure("area radius or depth", self.area_radius_or_depth)?;
        if let Some(height) = self.area_height {
            check_measure("area height", height)?;
        }
        if let Some(width) = self.area_width {
            check_measure("area width", width)?;
        }
        check_measure("range", self.range)?;
        check_measure("duration", self.duration)?;
        Ok(())
    }
}

fn check_measure(field: &'static str, value: f64) -> Result<(), SpellError> {
    if !value.is_finite() {
        return Err(SpellError::NotFinite { field });
    }
    if value < 0.0 {
        return Err(SpellError::NegativeValue { field, value });
    }
    Ok(())
}

/// An immutable castable spell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SpellArgs", into = "SpellArgs")]
pub struct Spell {
    args: SpellArgs,
}

impl Spell {
    /// Build a spell from authored arguments.
    pub fn new(args: SpellArgs) -> Result<Self, SpellError> {
        args.validate()?;
        Ok(Self { args })
    }

    pub fn args(&self) -> &SpellArgs {
        &self.args
    }

    pub fn area_shape(&self) -> AreaShape {
        self.args.area_shape
    }

    pub fn range(&self) -> f64 {
        self.args.range
    }

    pub fn duration(&self) -> f64 {
        self.args.duration
    }

    pub fn damage(&self) -> u32 {
        self.args.damage
    }

    pub fn damage_types(&self) -> &[DamageType] {
        &self.args.damage_types
    }

    pub fn effects(&self) -> &[Effect] {
        &self.args.effects
    }

    /// Mana cost of casting this spell.
    pub fn cost(&self) -> u32 {
        spell_cost(&self.args)
    }

    /// Display name derived from damage, cost, types, effects and shape.
    pub fn name(&self) -> String {
        generate_spell_name(
            self.args.damage,
            self.cost(),
            &self.args.damage_types,
            &self.args.effects,
            self.args.area_shape,
        )
    }

    /// Whether `mana` is enough to cast this spell.
    pub fn affordable_with(&self, mana: i32) -> bool {
        i64::from(mana) >= i64::from(self.cost())
    }
}

impl TryFrom<SpellArgs> for Spell {
    type Error = SpellError;

    fn try_from(args: SpellArgs) -> Result<Self, Self::Error> {
        Spell::new(args)
    }
}

impl From<Spell> for SpellArgs {
    fn from(spell: Spell) -> Self {
        spell.args
    }
}

impl fmt::Display for Spell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Mana cost of a spell shape.
///
/// Height and width of zero count as one, like an absent dimension.
pub fn spell_cost(args: &SpellArgs) -> u32 {
    let height = args.area_height.filter(|h| *h != 0.0).unwrap_or(1.0);
    let width = args.area_width.filter(|w| *w != 0.0).unwrap_or(1.0);
    let area_cost =
        (1.0 + args.area_shape.index() as f64 * (args.area_radius_or_depth + height + width)) * 1.5;

    let damage_type_cost: f64 = args
        .damage_types
        .iter()
        .enumerate()
        .map(|(i, t)| t.index() as f64 * 3.0 + i as f64 * 0.5)
        .sum();

    let effect_cost: f64 = args
        .effects
        .iter()
        .enumerate()
        .map(|(i, e)| e.index() as f64 * 1.5 + i as f64 * 0.5)
        .sum();

    let damage_cost = f64::from(args.damage).powf(1.15);

    let total = area_cost + args.range + args.duration + damage_cost + damage_type_cost + effect_cost;
    // Arguments are validated non-negative, so the floor fits in u32 for any sane spell.
    total.floor().clamp(0.0, f64::from(u32::MAX)) as u32
}

/// Build the display name of a spell.
///
/// Segments are joined by single spaces; empty segments (the blank damage
/// descriptor, an empty damage type list) leave no extra whitespace.
pub fn generate_spell_name(
    damage: u32,
    cost: u32,
    damage_types: &[DamageType],
    effects: &[Effect],
    area_shape: AreaShape,
) -> String {
    let damage_level = DAMAGE_DESCRIPTORS[bucket(damage, DAMAGE_DESCRIPTORS.len())];
    let cost_level = COST_DESCRIPTORS[bucket(cost, COST_DESCRIPTORS.len())];

    let mut words: Vec<&str> = vec![damage_level, cost_level];
    words.extend(damage_types.iter().map(|t| t.prefix()));
    words.push(area_shape.noun());

    let mut name = words
        .into_iter()
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let suffixes: Vec<&str> = effects
        .iter()
        .filter(|e| **e != Effect::None)
        .map(|e| e.suffix())
        .collect();
    if !suffixes.is_empty() {
        name.push_str(" of ");
        name.push_str(&suffixes.join(" and "));
    }

    name
}

fn bucket(value: u32, len: usize) -> usize {
    ((value / DESCRIPTOR_STEP) as usize).min(len - 1)
}
