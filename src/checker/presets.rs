//! Named checker configurations used in the evaluation.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::{Checker, CheckerConfig, CheckerError, Policy};
use crate::blacklist::BlackList;
use crate::pwmodel::PasswordModel;

pub const TOP2_CORRECTORS: [&str; 3] = ["same", "swc-all", "swc-first"];
pub const TOP3_CORRECTORS: [&str; 4] = ["same", "swc-all", "swc-first", "rm-lastc"];
pub const TOP5_CORRECTORS: [&str; 6] =
    ["same", "swc-all", "swc-first", "rm-lastc", "rm-firstc", "n2s-last"];

/// Preset used when none is named.
pub const DEFAULT_PRESET: &str = "ChkAll_Top2";

pub const PRESET_NAMES: [&str; 17] = [
    "ChkAll_Top2",
    "ChkAll_Top3",
    "ChkAll_Top5",
    "ChkBl_Top2",
    "ChkBl_Top3",
    "ChkBl_Top5",
    "ChkAOp_Top2",
    "ChkAOp_Top3",
    "ChkAOp_Top5",
    "ChkAll_swcall",
    "ChkAll_swcfirst",
    "ChkAll_rmlastc",
    "ChkAll_rmfirstc",
    "ChkAll_swslast",
    "ChkBl_keyedit",
    "ChkAll_keyedit",
    "ChkSelect_keyedit",
];

/// Configuration of a named preset.
pub fn preset(name: &str) -> Result<CheckerConfig, CheckerError> {
    let config = match name {
        "ChkAll_Top2" => CheckerConfig::new(TOP2_CORRECTORS, Policy::ChkAll),
        "ChkAll_Top3" => CheckerConfig::new(TOP3_CORRECTORS, Policy::ChkAll),
        "ChkAll_Top5" => CheckerConfig::new(TOP5_CORRECTORS, Policy::ChkAll),
        "ChkBl_Top2" => CheckerConfig::new(TOP2_CORRECTORS, Policy::ChkBl),
        "ChkBl_Top3" => CheckerConfig::new(TOP3_CORRECTORS, Policy::ChkBl),
        "ChkBl_Top5" => CheckerConfig::new(TOP5_CORRECTORS, Policy::ChkBl),
        "ChkAOp_Top2" => CheckerConfig::new(TOP2_CORRECTORS, Policy::ChkAOp),
        "ChkAOp_Top3" => CheckerConfig::new(TOP3_CORRECTORS, Policy::ChkAOp),
        "ChkAOp_Top5" => CheckerConfig::new(TOP5_CORRECTORS, Policy::ChkAOp),
        "ChkAll_swcall" => CheckerConfig::new(["swc-all"], Policy::ChkAll),
        "ChkAll_swcfirst" => CheckerConfig::new(["swc-first"], Policy::ChkAll),
        "ChkAll_rmlastc" => CheckerConfig::new(["rm-lastc"], Policy::ChkAll),
        "ChkAll_rmfirstc" => CheckerConfig::new(["rm-firstc"], Policy::ChkAll),
        "ChkAll_swslast" => CheckerConfig::new(["sws-last1"], Policy::ChkAll),
        "ChkBl_keyedit" => CheckerConfig::new(["keypress-edit"], Policy::ChkBl),
        "ChkAll_keyedit" => CheckerConfig::new(["keypress-edit"], Policy::ChkAll),
        "ChkSelect_keyedit" => CheckerConfig::new(["keypress-edit"], Policy::ChkSelect).with_topk(10),
        _ => return Err(CheckerError::UnknownPreset(name.to_string())),
    };
    Ok(config)
}

/// Builds the checker of a named preset around shared collaborators.
pub fn build_preset(
    name: &str,
    pwmodel: Arc<dyn PasswordModel>,
    blacklist: Arc<BlackList>,
) -> Result<Checker, CheckerError> {
    Checker::new(preset(name)?, pwmodel, blacklist)
}

/// Every preset, keyed by name, sharing one model and one blacklist.
pub fn build_all(
    pwmodel: Arc<dyn PasswordModel>,
    blacklist: Arc<BlackList>,
) -> Result<BTreeMap<&'static str, Checker>, CheckerError> {
    PRESET_NAMES
        .iter()
        .map(|&name| Ok((name, build_preset(name, pwmodel.clone(), blacklist.clone())?)))
        .collect()
}
