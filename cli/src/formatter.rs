use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Row, Table};
use friends::response::NO_MORE_SOLUTIONS;
use friends::{FriendsError, Rule, Solution};

const INPUT_MARK: &str = "> ";

pub struct Formatter {}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self {}
    }

    /// Echo of one input statement in a transcript
    pub fn format_input(&self, text: &str) -> String {
        format!("{}{}\n", INPUT_MARK, text)
    }

    pub fn format_solution(&self, solution: &Solution) -> String {
        format!("{}\n", solution.describe())
    }

    pub fn format_exhausted(&self) -> String {
        format!("{}\n", NO_MORE_SOLUTIONS)
    }

    pub fn format_truncated(&self, shown: usize) -> String {
        format!("... (stopped after {} solutions)\n", shown)
    }

    /// Failure text for a transcript. Parse errors keep their rendered excerpt.
    pub fn format_failure(&self, error: &FriendsError) -> String {
        match error {
            FriendsError::Parse(details) => format!("{}\n", details.message),
            other => format!("{}\n", other),
        }
    }

    /// One paragraph of a syntax check: the input, then nothing or what is wrong with it
    pub fn format_check(&self, text: &str, result: &Result<(), FriendsError>) -> String {
        let mut output = self.format_input(text);
        if let Err(error) = result {
            output.push_str(&self.format_failure(error));
        }
        output
    }

    pub fn format_workspace_summary(
        &self,
        file_count: usize,
        rule_count: usize,
        pred_stats: &[(String, usize)],
    ) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "Workspace contains {} files, {} rules\n\n",
            file_count, rule_count
        ));
        if pred_stats.is_empty() {
            return output;
        }

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            Cell::new("Predicate").set_alignment(CellAlignment::Left),
            Cell::new("Rules").set_alignment(CellAlignment::Right),
        ]));
        for (name, rules) in pred_stats {
            table.add_row(vec![
                Cell::new(name).set_alignment(CellAlignment::Left),
                Cell::new(rules).set_alignment(CellAlignment::Right),
            ]);
        }
        output.push_str(&format!("{}\n", table));
        output
    }

    pub fn format_rules<'a>(
        &self,
        pred_name: &str,
        rules: impl ExactSizeIterator<Item = &'a Rule>,
    ) -> String {
        let mut output = String::new();
        output.push_str(&format!("Predicate: {}\n\n", pred_name));
        output.push_str(&format!("rules ({}):\n", rules.len()));
        for rule in rules {
            output.push_str(&format!("  - {}\n", rule));
        }
        output
    }
}
