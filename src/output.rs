use crate::lookup::error::Failure;
use crate::lookup::models::Address;
use crate::race::RaceOutcome;

const TIMEOUT_NOTICE: &str = "Timeout!";

/// Lines to print on stdout for a finished race.
pub fn render(outcome: &RaceOutcome<Address, Failure>) -> Vec<String> {
    let (failures, last) = match outcome {
        RaceOutcome::Winner { value, failures } => (failures, render_address(value)),
        // Both failing looks the same as both being slow
        RaceOutcome::Exhausted(failures) | RaceOutcome::TimedOut(failures) => {
            (failures, TIMEOUT_NOTICE.to_string())
        },
    };

    let mut lines: Vec<String> = failures
        .iter()
        .map(|failure| format!("error in {}: {}", failure.provider, failure.error))
        .collect();
    lines.push(last);
    lines
}

fn render_address(address: &Address) -> String {
    let provider = address.provider();
    match serde_json::to_string(address) {
        Ok(json) => format!("{} response: {}", provider, json),
        Err(err) => format!("Error to convert {} JSON: {}", provider, err),
    }
}
