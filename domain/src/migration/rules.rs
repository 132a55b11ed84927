//! In-place rules migration
//!
//! From layout 2 on, `rules.yml` is never regenerated from defaults: users
//! write most of it themselves. Instead the live document is walked through
//! an ordered list of [`RulesStep`]s, each lifting it one version.
//!
//! A step runs against every rule in the file: `default-rule`, each entry
//! under `presets`, and each item of `custom-rules`.

use crate::document::ConfigDocument;
use crate::version::{VERSION_KEY, read_version};
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use tracing::debug;

/// Fine-tuning attribute keys moved under `multipliers` in version 4.
pub const FINE_TUNING_ATTRIBUTES: [&str; 6] = [
    "max-health",
    "attack-damage",
    "item-drop",
    "xp-drop",
    "movement-speed",
    "ranged-attack-damage",
];

const ALWAYS_VISIBLE_KEY: &str = "creature-nametag-always-visible";
const VISIBILITY_METHOD_KEY: &str = "nametag-visibility-method";
const FINE_TUNING_KEY: &str = "fine-tuning";
const MULTIPLIERS_KEY: &str = "multipliers";

/// One structural transform of the rules layout.
#[derive(Debug, Clone, Copy)]
pub struct RulesStep {
    pub from: u32,
    pub to: u32,
    pub description: &'static str,
    apply: fn(&mut Mapping),
}

/// Known rules steps, oldest first.
pub const RULES_STEPS: [RulesStep; 2] = [
    RulesStep {
        from: 2,
        to: 3,
        description: "nametag visibility flag replaced by visibility methods",
        apply: replace_visibility_flag,
    },
    RulesStep {
        from: 3,
        to: 4,
        description: "fine-tuning attributes moved under multipliers",
        apply: nest_fine_tuning_attributes,
    },
];

/// Newest rules version the steps produce.
pub fn latest_rules_version() -> u32 {
    RULES_STEPS.last().map_or(0, |step| step.to)
}

/// Outcome of running the rules steps on a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RulesMigration {
    pub from: u32,
    pub to: u32,
    pub applied: Vec<&'static str>,
}

impl RulesMigration {
    /// Whether the document was modified.
    pub fn changed(&self) -> bool {
        !self.applied.is_empty()
    }
}

/// Applies every step newer than the document's version, in order.
///
/// The version marker is advanced after each step. A document already at
/// or past [`latest_rules_version`] is left untouched.
pub fn migrate_rules(document: &mut ConfigDocument) -> RulesMigration {
    let from = read_version(document);
    let mut version = from;
    let mut applied = Vec::new();

    for step in &RULES_STEPS {
        if step.to <= version {
            continue;
        }
        for_each_rule(document.root_mut(), step.apply);
        version = step.to;
        document.set(VERSION_KEY, Value::from(version));
        debug!(from = step.from, to = step.to, "Applied rules step: {}", step.description);
        applied.push(step.description);
    }

    RulesMigration {
        from,
        to: version,
        applied,
    }
}

fn for_each_rule(root: &mut Mapping, apply: fn(&mut Mapping)) {
    if let Some(Value::Mapping(rule)) = root.get_mut("default-rule") {
        apply(rule);
    }
    if let Some(Value::Mapping(presets)) = root.get_mut("presets") {
        for (_, preset) in presets.iter_mut() {
            if let Value::Mapping(rule) = preset {
                apply(rule);
            }
        }
    }
    if let Some(Value::Sequence(custom)) = root.get_mut("custom-rules") {
        for item in custom.iter_mut() {
            if let Value::Mapping(rule) = item {
                apply(rule);
            }
        }
    }
}

/// 2 -> 3: `creature-nametag-always-visible: bool` becomes
/// `nametag-visibility-method: [ALWAYS]` or `[TARGETED]` at the same position.
fn replace_visibility_flag(rule: &mut Mapping) {
    if !rule.contains_key(ALWAYS_VISIBLE_KEY) {
        return;
    }

    let mut out = Mapping::with_capacity(rule.len());
    for (key, value) in std::mem::take(rule) {
        if key.as_str() != Some(ALWAYS_VISIBLE_KEY) {
            out.insert(key, value);
            continue;
        }
        let Some(always) = value.as_bool() else {
            continue;
        };
        let method = if always { "ALWAYS" } else { "TARGETED" };
        out.insert(
            Value::from(VISIBILITY_METHOD_KEY),
            Value::Sequence(vec![Value::from(method)]),
        );
    }
    *rule = out;
}

/// 3 -> 4: flat attribute keys of a `fine-tuning` block, and of each
/// per-mob block inside it, move into a nested `multipliers` mapping.
fn nest_fine_tuning_attributes(rule: &mut Mapping) {
    let Some(Value::Mapping(fine_tuning)) = rule.get_mut(FINE_TUNING_KEY) else {
        return;
    };

    nest_attributes(fine_tuning);
    for (key, value) in fine_tuning.iter_mut() {
        if key.as_str() == Some(MULTIPLIERS_KEY) {
            continue;
        }
        if let Value::Mapping(per_mob) = value {
            nest_attributes(per_mob);
        }
    }
}

fn nest_attributes(block: &mut Mapping) {
    let is_attribute = |key: &Value, value: &Value| {
        !value.is_mapping()
            && key
                .as_str()
                .is_some_and(|k| FINE_TUNING_ATTRIBUTES.contains(&k))
    };
    if !block.iter().any(|(k, v)| is_attribute(k, v)) {
        return;
    }

    let mut multipliers = match block.get(MULTIPLIERS_KEY) {
        Some(Value::Mapping(existing)) => existing.clone(),
        _ => Mapping::new(),
    };
    let mut rest = Mapping::with_capacity(block.len());
    for (key, value) in std::mem::take(block) {
        if key.as_str() == Some(MULTIPLIERS_KEY) {
            continue;
        }
        if is_attribute(&key, &value) {
            if !multipliers.contains_key(&key) {
                multipliers.insert(key, value);
            }
        } else {
            rest.insert(key, value);
        }
    }

    block.insert(Value::from(MULTIPLIERS_KEY), Value::Mapping(multipliers));
    block.extend(rest);
}
