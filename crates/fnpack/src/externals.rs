use arcstr::ArcStr;

/// Modules the target platform provides at run time; bundling them would
/// only bloat the artifact and, for the native ones, break it.
pub const BASELINE_EXTERNALS: [&str; 3] = ["aws-sdk", "knex", "sharp"];

/// Baseline first, then the user's externals in their order, skipping any
/// that merely repeat a baseline entry.
pub fn resolve_externals(user: &[ArcStr]) -> Vec<ArcStr> {
  let mut externals: Vec<ArcStr> = BASELINE_EXTERNALS.iter().copied().map(ArcStr::from).collect();
  externals
    .extend(user.iter().filter(|name| !BASELINE_EXTERNALS.contains(&name.as_str())).cloned());
  externals
}

#[test]
fn test_empty_user_list_yields_exactly_the_baseline() {
  assert_eq!(resolve_externals(&[]), ["aws-sdk", "knex", "sharp"]);
}

#[test]
fn test_user_externals_append_after_the_baseline() {
  let user = [ArcStr::from("pg"), ArcStr::from("ioredis")];
  assert_eq!(resolve_externals(&user), ["aws-sdk", "knex", "sharp", "pg", "ioredis"]);
}

#[test]
fn test_baseline_duplicates_are_skipped() {
  let user = [ArcStr::from("knex"), ArcStr::from("pg")];
  assert_eq!(resolve_externals(&user), ["aws-sdk", "knex", "sharp", "pg"]);
}
