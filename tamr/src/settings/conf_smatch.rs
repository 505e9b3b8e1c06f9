use std::fmt;

/// Parameters of the alignment search. Exact scores can move slightly between configurations,
/// the search is a heuristic.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SmatchConf {
    /// number of hill-climbing runs per pair, the first one starts from the smart initialization
    pub n_restarts: usize,
    /// seed of the random initializations, pair `i` is searched with `manual_seed + i`
    pub manual_seed: u64,
    /// maximum number of accepted moves per pair, the best alignment so far is kept when reached
    pub max_moves: Option<usize>,
    /// add a `(top, TOP, top)` triple as classic smatch does
    pub include_top: bool,
}

impl Default for SmatchConf {
    fn default() -> SmatchConf {
        SmatchConf {
            n_restarts: 5,
            manual_seed: 120,
            max_moves: None,
            include_top: false,
        }
    }
}

impl fmt::Debug for SmatchConf {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, r#"
    n_restarts  : {}
    manual_seed : {}
    max_moves   : {:?}
    include_top : {}"#,
        self.n_restarts,
        self.manual_seed,
        self.max_moves,
        self.include_top)
    }
}
