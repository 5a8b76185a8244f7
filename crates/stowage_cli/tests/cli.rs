use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

struct TestContext {
    temp_dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    fn cmd(&self, arguments: &[&str]) -> Command {
        let mut cmd = Command::cargo_bin("stowage").unwrap();
        cmd.args(arguments).env(
            "STOWAGE_STORE_PATH",
            self.temp_dir.path().join("stowage-test.sqlite3"),
        );
        cmd
    }

    fn ok(&self, arguments: &[&str]) -> assert_cmd::assert::Assert {
        self.cmd(arguments).assert().success()
    }

    fn fails(&self, arguments: &[&str]) -> assert_cmd::assert::Assert {
        self.cmd(arguments).assert().failure()
    }

    fn populate(&self) {
        self.ok(&["add-location", "Shelf", "4"]);
        self.ok(&["add-location", "Drawer", "1"]);
        self.ok(&["add-location", "Garage", "16"]);
    }
}

trait AssertHelpers {
    fn is_silent(self) -> Self;
    fn only_stdout(self, expected: &str) -> Self;
    fn only_stderr_contains(self, expected: &str) -> Self;
}

impl AssertHelpers for assert_cmd::assert::Assert {
    fn is_silent(self) -> Self {
        self.stdout(predicate::str::is_empty())
            .stderr(predicate::str::is_empty())
    }

    fn only_stdout(self, expected: &str) -> Self {
        self.stderr(predicate::str::is_empty())
            .stdout(predicate::eq(expected))
    }

    fn only_stderr_contains(self, expected: &str) -> Self {
        self.stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains(expected))
    }
}

#[test]
fn there_are_no_locations_to_start() {
    let ctx = TestContext::new();
    ctx.ok(&["locations"]).is_silent();
}

#[test]
fn added_locations_are_listed_with_bin_counts() {
    let ctx = TestContext::new();

    ctx.ok(&["add-location", "Shelf", "16"]).is_silent();
    ctx.ok(&["locations"]).only_stdout("Shelf (16 bins)\n");
}

#[test]
fn invalid_bin_counts_are_rejected() {
    let ctx = TestContext::new();

    ctx.fails(&["add-location", "Zero", "0"])
        .only_stderr_contains("Error: number of bins must be at least 1");
    ctx.fails(&["add-location", "Negative", "-1"]);
    ctx.ok(&["locations"]).is_silent();
}

#[test]
fn added_items_print_one_confirmation_row() {
    let ctx = TestContext::new();
    ctx.populate();

    ctx.ok(&["add", "Shelf/4", "Test item"])
        .only_stdout("Shelf/4: Test item (S)\n");
    ctx.ok(&["items"]).only_stdout("Shelf/4: Test item (S)\n");
}

#[test]
fn item_size_defaults_to_small_and_respects_the_argument() {
    let ctx = TestContext::new();
    ctx.populate();

    ctx.ok(&["add", "Shelf/1", "Plain"])
        .only_stdout("Shelf/1: Plain (S)\n");
    ctx.ok(&["add", "Shelf/1", "Bulky", "M"])
        .only_stdout("Shelf/1: Bulky (M)\n");
    ctx.fails(&["add", "Shelf/1", "Wrong", "Q"]);
}

#[test]
fn locations_match_case_insensitively() {
    let ctx = TestContext::new();
    ctx.populate();

    ctx.ok(&["add", "shelf/4", "Test item"])
        .only_stdout("Shelf/4: Test item (S)\n");
}

#[test]
fn unknown_locations_fail_with_an_error() {
    let ctx = TestContext::new();
    ctx.populate();

    ctx.fails(&["add", "Attic/4", "Test item"])
        .only_stderr_contains("no location matches \"Attic\"");
}

#[test]
fn out_of_range_bins_fail_with_an_error() {
    let ctx = TestContext::new();
    ctx.populate();

    ctx.fails(&["add", "Drawer/2", "Test item"])
        .only_stderr_contains("Error: location Drawer only has 1 bins, got bin 2");
}

#[test]
fn bad_address_syntax_fails_with_an_error() {
    let ctx = TestContext::new();
    ctx.populate();

    ctx.fails(&["add", "Shelf/0", "Test item"])
        .only_stderr_contains("invalid address `Shelf/0`");
}

#[test]
fn balancing_fills_bins_in_weight_order() {
    let ctx = TestContext::new();
    ctx.ok(&["add-location", "Shelf", "2"]).is_silent();

    ctx.ok(&["add", "Shelf", "Widget"])
        .only_stdout("Shelf/1: Widget (S)\n");
    ctx.ok(&["add", "Shelf", "Gadget"])
        .only_stdout("Shelf/2: Gadget (S)\n");

    ctx.ok(&["items"])
        .only_stdout("Shelf/1: Widget (S)\nShelf/2: Gadget (S)\n");
}

#[test]
fn items_sort_by_location_then_bin_then_name() {
    let ctx = TestContext::new();
    ctx.populate();

    ctx.ok(&["add", "shelf/4", "Test item", "M"]);
    ctx.ok(&["add", "shelf/3", "Test item", "M"]);
    ctx.ok(&["add", "garage/6", "Test item", "M"]);
    ctx.ok(&["add", "shelf/4", "Another item", "M"]);

    ctx.ok(&["items"]).only_stdout(
        "Garage/6: Test item (M)\n\
         Shelf/3: Test item (M)\n\
         Shelf/4: Another item (M)\n\
         Shelf/4: Test item (M)\n",
    );
}

#[test]
fn quickadd_reads_items_from_stdin() {
    let ctx = TestContext::new();
    ctx.populate();

    ctx.cmd(&["quickadd", "Shelf"])
        .write_stdin("Test 1\nTest 2\nTest 3 M\n")
        .assert()
        .success()
        .only_stdout("Shelf/1: Test 1 (S)\nShelf/2: Test 2 (S)\nShelf/3: Test 3 (M)\n");
}

#[test]
fn quickadd_stops_at_the_first_blank_line() {
    let ctx = TestContext::new();
    ctx.populate();

    ctx.cmd(&["quickadd", "Shelf"])
        .write_stdin("Kept\n\nDropped\n")
        .assert()
        .success()
        .only_stdout("Shelf/1: Kept (S)\n");

    ctx.ok(&["items"]).only_stdout("Shelf/1: Kept (S)\n");
}

#[test]
fn quickadd_with_no_input_creates_nothing() {
    let ctx = TestContext::new();
    ctx.populate();

    ctx.cmd(&["quickadd", "Shelf"])
        .write_stdin("")
        .assert()
        .success()
        .is_silent();
    ctx.ok(&["items"]).is_silent();
}

#[test]
fn undo_is_silent_and_reverts_the_last_command() {
    let ctx = TestContext::new();
    ctx.populate();

    ctx.ok(&["add", "Shelf/4", "Test item"])
        .only_stdout("Shelf/4: Test item (S)\n");
    ctx.ok(&["undo"]).is_silent();
    ctx.ok(&["items"]).is_silent();
}

#[test]
fn undo_with_nothing_to_undo_stays_silent() {
    let ctx = TestContext::new();
    ctx.ok(&["undo"]).is_silent();
}

#[test]
fn listing_twice_gives_identical_output() {
    let ctx = TestContext::new();
    ctx.populate();
    ctx.ok(&["add", "Shelf", "Test item"]);

    let first = ctx.cmd(&["items"]).assert().success();
    let second = ctx.cmd(&["items"]).assert().success();
    assert_eq!(
        first.get_output().stdout,
        second.get_output().stdout
    );
}
