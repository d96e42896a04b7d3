//! Toy command prompt with a fixed command table.

pub const FALLBACK: &str = "Command not recognized. Type \"help\" for the full list.";

const COMMANDS: &[(&str, &str)] = &[
    (
        "help",
        "Available commands:\n\
         \x20- help: Show this message\n\
         \x20- projects: List some of my projects\n\
         \x20- services: Find out what I can do for you\n\
         \x20- contact: Show the email address to reach me",
    ),
    (
        "projects",
        "Projects:\n\
         \x20• Immersive Interface – Augmented reality dashboard with real-time data\n\
         \x20• Dynamic Code – Live coding platform with WebAssembly and WebRTC streaming\n\
         \x20• Virtual City – Interactive 3D simulation of a cyberpunk metropolis",
    ),
    (
        "services",
        "Services:\n\
         \x20• Futuristic Frontend: WebGL animation, SPAs and responsive design\n\
         \x20• Backend & API: Scalable microservices, GraphQL and WebSocket\n\
         \x20• Cloud & DevOps: Containers, CI/CD and Kubernetes",
    ),
    ("contact", "Write to me at hello@example.com to talk about your project."),
];

/// Normalized form of a typed line: trimmed and lowercased.
pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Response for a normalized command.
pub fn respond(command: &str) -> &'static str {
    COMMANDS
        .iter()
        .find(|(name, _)| *name == command)
        .map_or(FALLBACK, |(_, reply)| *reply)
}

/// Lines to append to the output for a submitted input, or `None` for a
/// blank line. The first line echoes the command.
pub fn submit(input: &str) -> Option<[String; 2]> {
    let command = normalize(input);
    if command.is_empty() {
        return None;
    }
    let reply = respond(&command).to_owned();
    Some([format!("> {command}"), reply])
}

pub fn commands() -> impl Iterator<Item = &'static str> {
    COMMANDS.iter().map(|(name, _)| *name)
}
