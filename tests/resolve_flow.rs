//! End-to-end resolution: parse a database, resolve terms, inspect the
//! plan handed to the launcher.

use std::io::Cursor;

use anyhow::Result;
use gonav::core::dispatch::DispatchError;
use gonav::core::record::parse_records;
use gonav::core::resolver::{Outcome, Resolver};
use gonav::infra::config::Settings;

mod util;
use util::RecordingLauncher;

fn settings(suggestions: usize) -> Settings
{
    Settings {
        suggestions,
        shell: "sh".to_string(),
        color: false,
        ..Settings::default()
    }
}

fn terms(items: &[&str]) -> Vec<String>
{
    items
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Run the resolver and return (outcome, recorded launcher, user-facing output)
fn resolve(
    db: &str,
    search: &[&str],
    answer: &str,
    suggestions: usize,
) -> Result<(Outcome, RecordingLauncher, String)>
{
    let records = parse_records(db);
    let settings = settings(suggestions);
    let mut resolver = Resolver::new(
        &settings,
        RecordingLauncher::default(),
        Cursor::new(answer.to_string()),
        Vec::new(),
    );

    let outcome = resolver.run(&records, &terms(search))?;
    let (launcher, output) = resolver.into_parts();
    Ok((outcome, launcher, String::from_utf8(output)?))
}

#[test]
fn exact_alias_enters_directory() -> Result<()>
{
    let (outcome, launcher, output) = resolve("home,h | /tmp | Temp dir\n", &["h"], "", 1)?;

    assert_eq!(
        outcome,
        Outcome::Dispatched {
            alias: "h".to_string(),
            line: 1
        }
    );
    assert_eq!(launcher.plans.len(), 1);
    assert_eq!(
        launcher.plans[0].workdir,
        Some(dunce::canonicalize("/tmp")?)
    );
    assert_eq!(launcher.plans[0].program, "sh");
    assert_eq!(output, "Temp dir\n");
    Ok(())
}

#[test]
fn exact_match_beats_better_fuzzy_candidate() -> Result<()>
{
    // "tmp" is an exact alias on line 2 although "tmpx" on line 1 scores well
    let db = "tmpx | /tmp | First\nother,tmp | /tmp | Second\n";
    let (outcome, _, _) = resolve(db, &["tmp"], "", 1)?;

    assert_eq!(
        outcome,
        Outcome::Dispatched {
            alias: "tmp".to_string(),
            line: 2
        }
    );
    Ok(())
}

#[test]
fn first_record_in_file_order_wins() -> Result<()>
{
    let db = "dup | /tmp | One\ndup | / | Two\n";
    let (outcome, _, _) = resolve(db, &["dup"], "", 1)?;

    assert_eq!(
        outcome,
        Outcome::Dispatched {
            alias: "dup".to_string(),
            line: 1
        }
    );
    Ok(())
}

#[test]
fn later_term_can_hit_when_earlier_misses() -> Result<()>
{
    let db = "home | /tmp | Home\n";
    let (outcome, _, _) = resolve(db, &["zzz", "home"], "", 1)?;

    assert!(outcome.is_success());
    Ok(())
}

#[test]
fn missed_terms_share_one_board_for_disambiguation() -> Result<()>
{
    // "pi" alone ties pics/pix; the earlier "proj" keeps projects ahead
    let db = "projects | /tmp | Projects\npics | / | Pictures\npix | / | Pix\n";
    let (outcome, _, output) = resolve(db, &["proj", "pi"], "", 1)?;

    assert!(output.contains("Auto-selecting 'projects'"));
    assert_eq!(
        outcome,
        Outcome::Dispatched {
            alias: "projects".to_string(),
            line: 1
        }
    );
    Ok(())
}

#[test]
fn unrelated_first_term_does_not_mask_later_prefix() -> Result<()>
{
    let db = "projects | /tmp | Projects\npics | / | Pictures\n";
    let (outcome, _, output) = resolve(db, &["zzz", "proj"], "", 1)?;

    assert!(output.contains("Auto-selecting 'projects'"));
    assert!(outcome.is_success());
    Ok(())
}

#[test]
fn best_distance_across_terms_drives_suggestion() -> Result<()>
{
    // "qqqqqqqq" alone is far above the threshold; "buidl" is close
    let (outcome, _, output) = resolve("build | /tmp | Build\n", &["qqqqqqqq", "buidl"], "y\n", 1)?;

    assert!(output.contains("Did you mean 'build'?"));
    assert!(outcome.is_success());
    Ok(())
}

#[test]
fn confirmed_suggestion_resolves() -> Result<()>
{
    let src = tempfile::tempdir()?;
    let db = format!("build | {} | Build dir\n", src.path().display());

    let (outcome, launcher, output) = resolve(&db, &["buidl"], "y\n", 1)?;

    assert!(output.contains("Did you mean 'build'?"));
    assert_eq!(
        outcome,
        Outcome::Dispatched {
            alias: "build".to_string(),
            line: 1
        }
    );
    assert_eq!(
        launcher.plans[0].workdir,
        Some(dunce::canonicalize(src.path())?)
    );
    Ok(())
}

#[test]
fn answer_is_case_insensitive() -> Result<()>
{
    let (outcome, _, _) = resolve("build | /tmp | Build\n", &["buidl"], "YES\n", 1)?;
    assert!(outcome.is_success());
    Ok(())
}

#[test]
fn declined_suggestion_runs_nothing() -> Result<()>
{
    let (outcome, launcher, _) = resolve("build | /tmp | Build\n", &["buidl"], "n\n", 1)?;

    assert_eq!(outcome, Outcome::Declined("build".to_string()));
    assert!(launcher.plans.is_empty());
    Ok(())
}

#[test]
fn end_of_input_counts_as_no() -> Result<()>
{
    let (outcome, _, _) = resolve("build | /tmp | Build\n", &["buidl"], "", 1)?;
    assert_eq!(outcome, Outcome::Declined("build".to_string()));
    Ok(())
}

#[test]
fn distant_single_candidate_is_not_offered() -> Result<()>
{
    let (outcome, _, output) = resolve("build | /tmp | Build\n", &["qqqqqqqq"], "y\n", 1)?;

    assert_eq!(outcome, Outcome::NoMatch);
    assert!(output.is_empty());
    Ok(())
}

#[test]
fn empty_database_is_no_match() -> Result<()>
{
    let (outcome, launcher, output) = resolve("# only a header\n", &["anything"], "y\n", 1)?;

    assert_eq!(outcome, Outcome::NoMatch);
    assert!(launcher.plans.is_empty());
    assert!(output.is_empty());
    Ok(())
}

#[test]
fn unique_longest_prefix_auto_selects() -> Result<()>
{
    let db = "projects | /tmp | Projects\npics | / | Pictures\n";
    let (outcome, _, output) = resolve(db, &["proj"], "", 1)?;

    assert!(output.contains("Auto-selecting 'projects'"));
    assert_eq!(
        outcome,
        Outcome::Dispatched {
            alias: "projects".to_string(),
            line: 1
        }
    );
    Ok(())
}

#[test]
fn tied_prefixes_fall_through_to_suggestions() -> Result<()>
{
    let db = "alpha1 | /tmp | A\nalpha2 | / | B\n";
    let (outcome, _, output) = resolve(db, &["alphaX"], "", 2)?;

    assert!(!output.contains("Auto-selecting"));
    assert!(output.contains("Did you mean one of these?"));
    assert_eq!(
        outcome,
        Outcome::Suggested(vec!["alpha1".to_string(), "alpha2".to_string()])
    );
    Ok(())
}

#[test]
fn suggestion_list_is_capped() -> Result<()>
{
    let db = "abc1 | /a | A\nabc2 | /b | B\nabc3 | /c | C\n";
    let (outcome, _, _) = resolve(db, &["abcX"], "", 2)?;

    match outcome
    {
        Outcome::Suggested(list) => assert_eq!(list.len(), 2),
        other => panic!("expected suggestions, got {other:?}"),
    }
    Ok(())
}

#[test]
fn ssh_record_dispatches_to_host() -> Result<()>
{
    let (outcome, launcher, output) = resolve("db | myhost | Database | ssh\n", &["db"], "", 1)?;

    assert!(outcome.is_success());
    assert_eq!(launcher.plans[0].workdir, None);
    assert_eq!(launcher.plans[0].command_line(), Some("ssh myhost"));
    assert!(output.is_empty());
    Ok(())
}

#[test]
fn exec_record_runs_command_with_target() -> Result<()>
{
    let (_, launcher, _) = resolve("log | /var/log/syslog | Syslog | tail -f\n", &["log"], "", 1)?;

    assert_eq!(
        launcher.plans[0].command_line(),
        Some("tail -f /var/log/syslog")
    );
    Ok(())
}

#[test]
fn missing_directory_is_a_dispatch_error()
{
    let err = resolve("gone | /definitely/not/here/gonav | Gone\n", &["gone"], "", 1)
        .expect_err("dispatch should fail");

    assert!(err
        .downcast_ref::<DispatchError>()
        .is_some());
}
