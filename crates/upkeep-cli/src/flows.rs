use anyhow::Result;
use upkeep_core::{
    current_session, list_sessions, plan_rollback, record_asset_update, record_core_update,
    session_summary, AssetCategory, AssetId, CoreUpdateOutcome, DowngradeRequest, Ledger,
    RecordStamp, SessionSummary, SessionTarget, TranslationScope, UpdateExecutor,
};
use upkeep_store::LedgerStore;

use crate::render::{print_section, render_status_line, OutputStyle, RollbackProgress};

/// One full update pass: core, plugins, themes, translations, then a
/// storage optimize step. The ledger is persisted after every category that
/// records, so a fatal executor failure mid-run loses at most the category
/// in progress.
pub(crate) fn run_update_command(
    store: &LedgerStore,
    executor: &dyn UpdateExecutor,
    dry_run: bool,
    style: OutputStyle,
) -> Result<()> {
    if store.source().is_remote() && !dry_run {
        anyhow::bail!(
            "cannot run updates against a remote ledger: {} (remote sources are read-only)",
            store.source().describe()
        );
    }

    let mut ledger = match store.load()? {
        Some(ledger) => ledger,
        None => Ledger::new(
            Some(executor.site_url()?),
            Some(chrono::Local::now().format("%B %Y").to_string()),
        ),
    };

    let stamp = RecordStamp {
        session: current_session(&ledger),
        date: chrono::Local::now().format("%d-%m-%Y %H:%M").to_string(),
    };

    print_section(style, "core");
    run_core_step(&mut ledger, executor, &stamp, style)?;
    persist(store, &ledger, dry_run)?;

    for category in [AssetCategory::Plugin, AssetCategory::Theme] {
        print_section(style, category.as_str());
        run_category_step(&mut ledger, executor, category, &stamp, style)?;
        persist(store, &ledger, dry_run)?;
    }

    print_section(style, "translations");
    for scope in TranslationScope::ALL {
        executor.update_translations(scope)?;
    }

    print_section(style, "optimize");
    executor.optimize_storage()?;

    println!(
        "{}",
        render_status_line(style, "ok", &run_summary_message(&ledger, stamp.session))
    );
    Ok(())
}

fn run_core_step(
    ledger: &mut Ledger,
    executor: &dyn UpdateExecutor,
    stamp: &RecordStamp,
    style: OutputStyle,
) -> Result<()> {
    let Some(new_version) = executor.check_core_version()? else {
        println!("{}", render_status_line(style, "step", "core is up to date"));
        return Ok(());
    };

    // The platform update and the database upgrade are dispatched before the
    // dedup check; re-observing a recorded version must not append twice.
    let old_version = executor.installed_core_version()?;
    let result = executor.update_core()?;
    let db_result = executor.update_core_database()?;
    let outcome = CoreUpdateOutcome {
        old_version,
        new_version,
        result,
        db_result,
    };

    if record_core_update(ledger, stamp, &outcome) {
        println!(
            "{}",
            render_status_line(
                style,
                "ok",
                &format!(
                    "recorded core {} -> {}",
                    outcome.old_version, outcome.new_version
                )
            )
        );
    } else {
        println!(
            "{}",
            render_status_line(
                style,
                "step",
                &format!("core {} already recorded", outcome.new_version)
            )
        );
    }
    Ok(())
}

fn run_category_step(
    ledger: &mut Ledger,
    executor: &dyn UpdateExecutor,
    category: AssetCategory,
    stamp: &RecordStamp,
    style: OutputStyle,
) -> Result<()> {
    let pending = executor.update_all(category)?;
    if pending.is_empty() {
        println!(
            "{}",
            render_status_line(
                style,
                "step",
                &format!("no {} updates available", category.as_str())
            )
        );
        return Ok(());
    }

    for update in &pending {
        // Known versions skip the metadata fetch entirely.
        if ledger.version_recorded(category, &update.name, &update.new_version) {
            println!(
                "{}",
                render_status_line(
                    style,
                    "step",
                    &format!("{} {} already recorded", update.name, update.new_version)
                )
            );
            continue;
        }

        let metadata = executor.asset_metadata(category, &update.name)?;
        record_asset_update(ledger, category, stamp, update, metadata);
        println!(
            "{}",
            render_status_line(
                style,
                "ok",
                &format!(
                    "recorded {} {} -> {}",
                    update.name, update.old_version, update.new_version
                )
            )
        );
    }
    Ok(())
}

fn persist(store: &LedgerStore, ledger: &Ledger, dry_run: bool) -> Result<()> {
    if dry_run {
        return Ok(());
    }
    store.save(ledger)
}

pub(crate) fn run_summary_message(ledger: &Ledger, session: u64) -> String {
    match session_summary(ledger, session) {
        Some(summary) => format!(
            "{} asset(s) was/were updated ({})",
            summary.count, summary.assets
        ),
        None => "Everything is up to date!".to_string(),
    }
}

/// Replays a planned session in reverse: every recorded asset is downgraded
/// back to its old version. One entry failing does not stop the rest; the
/// failures are reported in aggregate. The ledger itself is never written.
pub(crate) fn run_rollback_command(
    store: &LedgerStore,
    executor: &dyn UpdateExecutor,
    target: SessionTarget,
    dry_run: bool,
    style: OutputStyle,
) -> Result<()> {
    let Some(ledger) = store.load()? else {
        anyhow::bail!("no rollback available (file {})", store.source().describe());
    };

    let plan = plan_rollback(&ledger, target)?;
    let progress = RollbackProgress::start(style, plan.entries.len() as u64);
    let mut failures = Vec::new();

    for entry in &plan.entries {
        let request = DowngradeRequest {
            asset: entry.asset.clone(),
            version: entry.old_version.clone(),
            force: entry.asset == AssetId::Core,
        };

        progress.println(&format!(
            "Run command: {}",
            executor.describe_downgrade(&request)
        ));
        if dry_run {
            progress.advance();
            continue;
        }

        match executor.downgrade(&request) {
            Ok(result) => {
                if !result.is_empty() {
                    progress.println(&format!("Result: {result}"));
                }
            }
            Err(err) => failures.push(format!("{}: {err:#}", entry.asset.name())),
        }
        progress.advance();
    }
    progress.finish();

    if failures.is_empty() {
        println!("{}", render_status_line(style, "ok", "Rollback completed!"));
        return Ok(());
    }

    for failure in &failures {
        println!("{}", render_status_line(style, "err", failure));
    }
    anyhow::bail!(
        "{} of {} rollback step(s) failed",
        failures.len(),
        plan.entries.len()
    )
}

pub(crate) fn run_list_command(store: &LedgerStore) -> Result<()> {
    let ledger = store.load()?.unwrap_or_default();
    let sessions = list_sessions(&ledger, current_session(&ledger));
    for line in format_session_table(&sessions) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn format_session_table(sessions: &[SessionSummary]) -> Vec<String> {
    let mut lines = Vec::with_capacity(sessions.len() + 1);
    lines.push("session\tdate\tcount\tassets".to_string());
    for summary in sessions {
        lines.push(format!(
            "{}\t{}\t{}\t{}",
            summary.session, summary.date, summary.count, summary.assets
        ));
    }
    lines
}
