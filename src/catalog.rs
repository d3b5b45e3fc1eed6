use crate::taxonomy::MemeCategory;

/// Curated mapping of category to source subreddits, plus the fixed search
/// queries used by the tournament pass. Injected into the aggregator at
/// construction so tests can run against synthetic source lists.
#[derive(Debug, Clone)]
pub struct SourceCatalog {
    pub sources_by_category: Vec<(MemeCategory, Vec<String>)>,
    pub search_queries: Vec<String>,
    pub search_group_label: String,
    pub per_source_limit: u32,
}

impl SourceCatalog {
    pub fn curated() -> Self {
        Self {
            sources_by_category: vec![
                (
                    MemeCategory::Entertainment,
                    to_strings(&[
                        "BollyBlindsNGossip",
                        "bollywoodmemes",
                        "bollywood",
                        "IndianCinema",
                        "BollywoodRealism",
                        "SaimanSays",
                        "IndianDankMemes",
                        "desimemes",
                    ]),
                ),
                (
                    MemeCategory::Tech,
                    to_strings(&[
                        "ProgrammerHumor",
                        "programmerreactions",
                        "coding_memes",
                        "programmingmemes",
                        "techhumor",
                        "softwaregore",
                        "developersIndia",
                        "IndianTechnology",
                    ]),
                ),
                (
                    MemeCategory::Sports,
                    to_strings(&[
                        "CricketShitpost",
                        "cricketmemes",
                        "Cricket",
                        "IndianSports",
                        "indiansports",
                    ]),
                ),
                (
                    MemeCategory::Politics,
                    to_strings(&["indiameme", "indianpoliticalmemes", "dankinindia"]),
                ),
            ],
            search_queries: to_strings(&[
                "champions+trophy",
                "india+bangladesh+match",
                "icc+tournament",
                "cricket+worldcup",
            ]),
            search_group_label: "ICC_Champions_Trophy".to_string(),
            per_source_limit: 25,
        }
    }

    pub fn sources_for(&self, category: MemeCategory) -> &[String] {
        self.sources_by_category
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, subs)| subs.as_slice())
            .unwrap_or(&[])
    }
}

impl Default for SourceCatalog {
    fn default() -> Self {
        Self::curated()
    }
}

fn to_strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}
