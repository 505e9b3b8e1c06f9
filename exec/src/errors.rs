// Create the Error, ErrorKind, ResultExt, and Result types
error_chain! {
    links {
        Tamr(::tamr::errors::Error, ::tamr::errors::ErrorKind);
    }

    foreign_links {
        Io(::std::io::Error);
        Csv(::csv::Error);
        Json(::serde_json::Error);
    }
}
