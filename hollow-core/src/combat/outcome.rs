//! Results of resolved actions and the messages shown for them.
//!
//! Messages are built from [`Segment`]s so a presentation layer can style
//! the critical flag, the acting ability and the damage number separately.
//! [`OutcomeMessage::html`] renders them with inline spans and escapes all
//! text it embeds.

use super::action::{PlayerAction, Reaction};
use super::turn::Participant;
use crate::enemy::EnemyId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How an attack landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackResult {
    Missed,
    Dodged,
    Hit { damage: i32, critical: bool },
}

impl AttackResult {
    pub fn damage(&self) -> i32 {
        match self {
            AttackResult::Hit { damage, .. } => *damage,
            _ => 0,
        }
    }

    pub fn is_critical(&self) -> bool {
        matches!(self, AttackResult::Hit { critical: true, .. })
    }
}

/// Everything that happened during a player attack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerAttackReport {
    pub action: PlayerAction,
    pub ability_name: String,
    pub target: EnemyId,
    pub target_name: String,
    pub attack_roll: u32,
    pub result: AttackResult,
    /// The target spent a reaction trying to evade.
    pub reaction_attempted: bool,
    /// Mana change applied to the character (positive restores).
    pub mana_delta: i32,
    pub target_defeated: bool,
}

/// Everything that happened during an enemy attack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyAttackReport {
    pub attacker: EnemyId,
    pub attacker_name: String,
    pub attack_roll: u32,
    pub result: AttackResult,
    pub reaction: Option<Reaction>,
    pub reaction_succeeded: bool,
    /// Damage dealt back to the attacker by a successful parry.
    pub retaliation: i32,
    pub attacker_defeated: bool,
}

impl EnemyAttackReport {
    pub fn blocked(&self) -> bool {
        self.reaction == Some(Reaction::Block) && self.reaction_succeeded
    }

    pub fn parried(&self) -> bool {
        self.reaction == Some(Reaction::Parry) && self.reaction_succeeded
    }
}

/// The most recent resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    PlayerAttack(PlayerAttackReport),
    EnemyAttack(EnemyAttackReport),
    /// The current slot holds no live enemy, nothing happened.
    Idle { slot: Participant },
}

impl Outcome {
    pub fn message(&self) -> OutcomeMessage {
        match self {
            Outcome::PlayerAttack(report) => {
                attack_message(report.result, &report.ability_name)
            }
            Outcome::EnemyAttack(report) => {
                let mut message = attack_message(report.result, &report.attacker_name);
                if report.blocked() && report.result.damage() > 0 {
                    message.push(Segment::text(" (blocked)"));
                }
                if report.parried() {
                    message.push(Segment::text(", parried for "));
                    message.push(Segment::Damage(report.retaliation));
                }
                message
            }
            Outcome::Idle { .. } => OutcomeMessage::from(vec![Segment::text("No enemy acts")]),
        }
    }
}

fn attack_message(result: AttackResult, ability: &str) -> OutcomeMessage {
    match result {
        AttackResult::Dodged => OutcomeMessage::from(vec![Segment::text("Dodged")]),
        AttackResult::Missed => OutcomeMessage::from(vec![Segment::text("Missed")]),
        AttackResult::Hit { damage, critical } => {
            let mut segments = Vec::with_capacity(5);
            if critical {
                segments.push(Segment::Critical);
            }
            segments.push(Segment::text("Attack "));
            segments.push(Segment::Ability(ability.to_string()));
            segments.push(Segment::text(" hit for "));
            segments.push(Segment::Damage(damage));
            OutcomeMessage::from(segments)
        }
    }
}

/// A piece of an outcome message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    Text(String),
    /// The critical-hit flag.
    Critical,
    /// Name of the acting weapon, spell or enemy.
    Ability(String),
    /// A damage amount.
    Damage(i32),
}

impl Segment {
    pub fn text(s: impl Into<String>) -> Self {
        Segment::Text(s.into())
    }
}

/// A rendered-on-demand outcome message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeMessage {
    segments: Vec<Segment>,
}

impl OutcomeMessage {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Render without markup.
    pub fn plain(&self) -> String {
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Text(t) => t.clone(),
                Segment::Critical => "Critical ".to_string(),
                Segment::Ability(name) => name.clone(),
                Segment::Damage(n) => format!("{n} damage"),
            })
            .collect()
    }

    /// Render with colour spans for the critical flag, ability and damage.
    pub fn html(&self) -> String {
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Text(t) => escape_html(t),
                Segment::Critical => r#"<span class="text-green-500">Critical </span>"#.to_string(),
                Segment::Ability(name) => {
                    format!(r#"<span class="text-blue-500">{}</span>"#, escape_html(name))
                }
                Segment::Damage(n) => format!(r#"<span class="text-red-500">{n} damage</span>"#),
            })
            .collect()
    }
}

impl From<Vec<Segment>> for OutcomeMessage {
    fn from(segments: Vec<Segment>) -> Self {
        Self { segments }
    }
}

impl fmt::Display for OutcomeMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.plain())
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_hit(critical: bool) -> Outcome {
        Outcome::PlayerAttack(PlayerAttackReport {
            action: PlayerAction::Weapon,
            ability_name: "Sword".to_string(),
            target: EnemyId::new(),
            target_name: "Garrik".to_string(),
            attack_roll: 10,
            result: AttackResult::Hit {
                damage: 8,
                critical,
            },
            reaction_attempted: false,
            mana_delta: 10,
            target_defeated: false,
        })
    }

    #[test]
    fn test_critical_hit_message() {
        let message = player_hit(true).message();
        assert_eq!(message.plain(), "Critical Attack Sword hit for 8 damage");
        assert_eq!(
            message.html(),
            "<span class=\"text-green-500\">Critical </span>Attack \
             <span class=\"text-blue-500\">Sword</span> hit for \
             <span class=\"text-red-500\">8 damage</span>"
        );
    }

    #[test]
    fn test_plain_hit_has_no_critical_segment() {
        let message = player_hit(false).message();
        assert!(!message.segments().contains(&Segment::Critical));
        assert_eq!(message.to_string(), "Attack Sword hit for 8 damage");
    }

    #[test]
    fn test_html_escapes_names() {
        let message = OutcomeMessage::from(vec![Segment::Ability("<b>Rat</b>".to_string())]);
        assert_eq!(
            message.html(),
            "<span class=\"text-blue-500\">&lt;b&gt;Rat&lt;/b&gt;</span>"
        );
    }

    #[test]
    fn test_parry_message() {
        let outcome = Outcome::EnemyAttack(EnemyAttackReport {
            attacker: EnemyId::new(),
            attacker_name: "Garrik".to_string(),
            attack_roll: 6,
            result: AttackResult::Hit {
                damage: 3,
                critical: false,
            },
            reaction: Some(Reaction::Parry),
            reaction_succeeded: true,
            retaliation: 2,
            attacker_defeated: false,
        });
        assert_eq!(
            outcome.message().plain(),
            "Attack Garrik hit for 3 damage, parried for 2 damage"
        );
    }
}
