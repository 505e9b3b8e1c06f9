// Create the Error, ErrorKind, ResultExt, and Result types
error_chain! {
    foreign_links {
        Io(::std::io::Error);
        Json(::serde_json::Error);
        Yaml(::serde_yaml::Error);
    }

    errors {
        MalformedGraph(message: String, position: usize) {
            description("malformed PENMAN graph")
            display("malformed PENMAN graph at char {}: {}", position, message)
        }

        SchemaMismatch(role: String, reason: String) {
            description("triple cannot be interpreted")
            display("cannot interpret triple with role `:{}`: {}", role, reason)
        }

        AlignmentTimeout(n_moves: usize) {
            description("alignment search budget exhausted")
            display("alignment search stopped after {} moves, keeping the best alignment found", n_moves)
        }
    }
}
