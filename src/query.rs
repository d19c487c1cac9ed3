use crate::error::*;
use multi_search_core::ByteAutomaton;
use snafu::*;

type Json = String;

/// Parse a command line and extract the text to scan.
/// The text starts right after the first space and may itself contain spaces.
fn parse_command_line(line: &str) -> Result<&str> {
    let mut split = line.splitn(2, ' ');
    let action = split.next().context(CommandParse {
        line,
        cause: "No action found",
    })?;

    if action != "scan" {
        None.context(CommandParse {
            line,
            cause: "Action not recognized",
        })?
    }

    // A missing text is a valid empty input
    Ok(split.next().unwrap_or(""))
}

/// Format a match to JSON and append it to the given buffer.
fn append_match_to_json(pattern: u32, start: usize, end: usize, json_buffer: &mut Json) {
    // Add to the buffer: {"pattern":<pattern>,"start":<start>,"end":<end>}
    // Do not use format!() to avoid its overhead
    json_buffer.push_str(r#"{"pattern":"#);
    json_buffer.push_str(&pattern.to_string());
    json_buffer.push_str(r#","start":"#);
    json_buffer.push_str(&start.to_string());
    json_buffer.push_str(r#","end":"#);
    json_buffer.push_str(&end.to_string());
    json_buffer.push('}');
}

/// Scan a text against the automaton and return every match in a JSON
/// representation, in emission order (by end position).
fn process_scan(automaton: &ByteAutomaton, text: &str, mut json_buffer: Json) -> Json {
    // Clear the buffer of its old data
    json_buffer.clear();

    json_buffer.push('[');
    for found in automaton.scan(text.bytes()) {
        append_match_to_json(*found.pattern_id, found.start, found.end, &mut json_buffer);

        // Add comma between elements in the JSON array
        json_buffer.push(',');
    }
    // Remove the invalid trailing comma from the JSON array
    if json_buffer.ends_with(',') {
        json_buffer.pop();
    }
    json_buffer.push(']');

    json_buffer
}

/// Display the JSON result in the [standard output stream](std::io::stdout)
fn display_json_result(json_buffer: &str) {
    println!("{}", json_buffer);
}

/// Process queries received in the [standard input stream](std::io::stdin)
pub fn process_stdin_queries(automaton: &ByteAutomaton) -> Result<()> {
    const LINE_CAP: usize = 120;
    const JSON_BUFFER_CAP: usize = 300;

    // Initialize the buffers used to reduce allocation overhead
    let mut line = String::with_capacity(LINE_CAP);
    let mut json_buffer = Json::with_capacity(JSON_BUFFER_CAP);

    let input_stream = std::io::stdin();
    loop {
        line.clear();
        match input_stream.read_line(&mut line) {
            Ok(0) => return Ok(()), // EOF reached
            Ok(_) => {
                // Parse the command
                let text = match parse_command_line(line.trim_end_matches('\n')) {
                    Ok(text) => text,
                    Err(e) => {
                        eprintln!("> {}", e);
                        continue;
                    }
                };

                json_buffer = process_scan(automaton, text, json_buffer);
                display_json_result(&json_buffer);
            }
            Err(e) => Err(e).context(Stdin)?,
        }
    }
}
