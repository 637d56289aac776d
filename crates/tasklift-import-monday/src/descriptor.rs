//! Importer descriptor

use serde::Serialize;

/// Static description of an importer shown to users before they connect it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImporterInfo {
    /// Codename / ID of the importer
    pub code: &'static str,
    /// Name of the source application
    pub name: &'static str,
    /// Where users obtain their app key
    pub url: &'static str,
    /// Inputs the importer needs
    pub input_fields: &'static [&'static str],
}

pub const MONDAY_IMPORTER: ImporterInfo = ImporterInfo {
    code: "monday",
    name: "Monday",
    url: "https://api.developer.monday.com/docs/authentication",
    input_fields: &["team_id", "nt_auth_token", "app_key"],
};
