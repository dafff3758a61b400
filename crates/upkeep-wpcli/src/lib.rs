use std::process::Command;

use anyhow::{Context, Result};
use upkeep_core::{
    AssetCategory, AssetId, AssetMetadata, DowngradeRequest, PendingUpdate, TranslationScope,
    UpdateExecutor,
};

pub struct WpCli {
    binary: String,
    alias: Option<String>,
    dry_run: bool,
}

impl WpCli {
    pub fn new(binary: impl Into<String>, dry_run: bool) -> Self {
        WpCli {
            binary: binary.into(),
            alias: None,
            dry_run,
        }
    }

    pub fn resolve_alias(&mut self, alias: &str) -> Result<()> {
        let normalized = normalize_alias(alias);
        let raw = self.run_wp(&["cli", "alias", "list", "--format=json"])?;
        let known = parse_alias_names(&raw)?;
        if !known.iter().any(|name| name == &normalized) {
            anyhow::bail!("unknown wp alias '{normalized}'; run 'wp cli alias list'");
        }
        self.alias = Some(normalized);
        Ok(())
    }

    fn run_wp(&self, args: &[&str]) -> Result<String> {
        let mut command = Command::new(&self.binary);
        if let Some(alias) = &self.alias {
            command.arg(alias);
        }
        command.args(args);

        let output = command
            .output()
            .with_context(|| format!("failed launching {}", self.command_line(args)))?;
        if !output.status.success() {
            anyhow::bail!(
                "wp {} failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn command_line(&self, args: &[&str]) -> String {
        let mut pieces: Vec<&str> = Vec::with_capacity(args.len() + 2);
        pieces.push(self.binary.as_str());
        if let Some(alias) = &self.alias {
            pieces.push(alias.as_str());
        }
        pieces.extend_from_slice(args);
        pieces.join(" ")
    }

    fn announce(&self, args: &[&str]) {
        println!("Run command: {}", self.command_line(args));
    }
}

impl UpdateExecutor for WpCli {
    fn check_core_version(&self) -> Result<Option<String>> {
        let raw = self.run_wp(&["core", "check-update", "--field=version", "--format=json"])?;
        parse_core_check_update(&raw)
    }

    fn installed_core_version(&self) -> Result<String> {
        self.run_wp(&["core", "version"])
    }

    fn site_url(&self) -> Result<String> {
        let raw = self.run_wp(&["option", "get", "siteurl", "--format=json"])?;
        serde_json::from_str(&raw).context("option get siteurl produced invalid JSON")
    }

    fn update_core(&self) -> Result<String> {
        self.announce(&["core", "update"]);
        if self.dry_run {
            return Ok(String::new());
        }
        let result = self.run_wp(&["core", "update"])?;
        println!("Result: {result}");
        Ok(result)
    }

    fn update_core_database(&self) -> Result<String> {
        let mut args = vec!["core", "update-db"];
        if self.dry_run {
            args.push("--dry-run");
        }
        self.announce(&args);
        let db_result = self.run_wp(&args)?;
        println!("Result: {db_result}");
        Ok(db_result)
    }

    fn update_all(&self, category: AssetCategory) -> Result<Vec<PendingUpdate>> {
        if !matches!(category, AssetCategory::Plugin | AssetCategory::Theme) {
            anyhow::bail!("{} does not support bulk updates", category.as_str());
        }

        let mut args = vec![category.as_str(), "update", "--all", "--format=json"];
        if self.dry_run {
            args.push("--dry-run");
        }
        self.announce(&args);
        let raw = self.run_wp(&args)?;
        Ok(parse_pending_updates(&raw))
    }

    fn asset_metadata(&self, category: AssetCategory, name: &str) -> Result<AssetMetadata> {
        let raw = self.run_wp(&[
            category.as_str(),
            "get",
            name,
            "--fields=title,author,status,description",
            "--format=json",
        ])?;
        serde_json::from_str(&raw)
            .with_context(|| format!("{} get {name} produced invalid JSON", category.as_str()))
    }

    fn downgrade(&self, request: &DowngradeRequest) -> Result<String> {
        let args = downgrade_args(request);
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        self.run_wp(&arg_refs)
    }

    fn describe_downgrade(&self, request: &DowngradeRequest) -> String {
        let args = downgrade_args(request);
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        self.command_line(&arg_refs)
    }

    fn update_translations(&self, scope: TranslationScope) -> Result<String> {
        let mut args = match scope {
            TranslationScope::Core => vec!["language", "core", "update"],
            TranslationScope::Plugin => vec!["language", "plugin", "update", "--all"],
            TranslationScope::Theme => vec!["language", "theme", "update", "--all"],
        };
        if self.dry_run {
            args.push("--dry-run");
        }
        self.announce(&args);
        let result = self.run_wp(&args)?;
        println!("Result: {result}");
        Ok(result)
    }

    fn optimize_storage(&self) -> Result<String> {
        self.announce(&["db", "optimize"]);
        if self.dry_run {
            return Ok(String::new());
        }
        let result = self.run_wp(&["db", "optimize"])?;
        println!("Result: {result}");
        Ok(result)
    }
}

fn normalize_alias(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.starts_with('@') {
        trimmed.to_string()
    } else {
        format!("@{trimmed}")
    }
}

fn parse_alias_names(raw: &str) -> Result<Vec<String>> {
    let value: serde_json::Value =
        serde_json::from_str(raw).context("wp cli alias list produced invalid JSON")?;
    let aliases = value
        .as_object()
        .context("wp cli alias list produced unexpected JSON shape")?;
    Ok(aliases.keys().cloned().collect())
}

fn parse_core_check_update(raw: &str) -> Result<Option<String>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: serde_json::Value =
        serde_json::from_str(trimmed).context("core check-update produced invalid JSON")?;
    let version = match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(version) => Some(version),
        serde_json::Value::Array(entries) => match entries.last() {
            None => None,
            Some(serde_json::Value::String(version)) => Some(version.clone()),
            Some(other) => {
                anyhow::bail!("core check-update produced unexpected JSON entry: {other}")
            }
        },
        other => anyhow::bail!("core check-update produced unexpected JSON: {other}"),
    };

    Ok(version.filter(|version| !version.is_empty()))
}

fn parse_pending_updates(raw: &str) -> Vec<PendingUpdate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    serde_json::from_str(trimmed).unwrap_or_default()
}

fn downgrade_args(request: &DowngradeRequest) -> Vec<String> {
    let mut args = match &request.asset {
        AssetId::Core => vec!["core".to_string(), "update".to_string()],
        AssetId::Named { category, name } => vec![
            category.as_str().to_string(),
            "update".to_string(),
            name.clone(),
        ],
    };
    args.push(format!("--version={}", request.version));
    if request.force {
        args.push("--force".to_string());
    }
    args
}
