use evaluation_metrics::fine_grained::Category;

#[derive(Clone, Deserialize, Serialize, Debug)]
#[serde(default)]
pub struct FineGrainedConf {
    pub enable: bool,
    pub categories: Vec<Category>,
}

impl Default for FineGrainedConf {
    fn default() -> FineGrainedConf {
        FineGrainedConf {
            enable: true,
            categories: Category::all().to_vec(),
        }
    }
}
