use serde::{Deserialize, Serialize};

/// Closed two-level taxonomy used to bucket topics. Categories are a fixed
/// enumeration; each carries its own fixed subcategory list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemeCategory {
    Sports,
    Politics,
    Entertainment,
    Tech,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subcategory {
    pub id: &'static str,
    pub name: &'static str,
    pub keywords: &'static [&'static str],
}

const SPORTS_SUBCATEGORIES: &[Subcategory] = &[
    Subcategory {
        id: "cricket",
        name: "Cricket",
        keywords: &[
            "cricket",
            "ipl",
            "bcci",
            "test match",
            "t20",
            "icc",
            "champions trophy",
            "worldcup",
        ],
    },
    Subcategory {
        id: "soccer",
        name: "Soccer",
        keywords: &["soccer", "football", "fifa", "premier league", "champions league"],
    },
    Subcategory {
        id: "basketball",
        name: "Basketball",
        keywords: &["nba", "basketball", "lebron", "bulls", "lakers"],
    },
    Subcategory {
        id: "formula1",
        name: "Formula 1",
        keywords: &["f1", "formula 1", "racing", "ferrari", "mercedes"],
    },
    Subcategory {
        id: "esports",
        name: "Esports",
        keywords: &["esports", "competitive gaming", "tournament", "league"],
    },
];

const TECH_SUBCATEGORIES: &[Subcategory] = &[
    Subcategory {
        id: "programming",
        name: "Programming",
        keywords: &[
            "programming",
            "coding",
            "developer",
            "software",
            "bug",
            "code",
            "compiler",
            "debugging",
            "algorithm",
            "git",
            "stack overflow",
            "python",
            "java",
            "javascript",
            "css",
            "html",
            "react",
            "angular",
            "exam",
            "student",
            "cheating",
            "study",
            "homework",
            "assignment",
        ],
    },
    Subcategory {
        id: "ai_ml",
        name: "AI & ML",
        keywords: &[
            "ai",
            "artificial intelligence",
            "machine learning",
            "chatgpt",
            "deep learning",
            "neural network",
            "data science",
            "model",
            "training",
            "dataset",
        ],
    },
    Subcategory {
        id: "elon",
        name: "Elon Musk",
        keywords: &[
            "elon",
            "musk",
            "tesla",
            "spacex",
            "twitter",
            "starship",
            "boring company",
            "neuralink",
            "cybertruck",
        ],
    },
    Subcategory {
        id: "tech_companies",
        name: "Tech Companies",
        keywords: &[
            "google",
            "apple",
            "microsoft",
            "meta",
            "facebook",
            "amazon",
            "aws",
            "netflix",
            "startup",
            "silicon valley",
            "tech company",
        ],
    },
    Subcategory {
        id: "gaming_tech",
        name: "Gaming & Hardware",
        keywords: &[
            "gpu",
            "cpu",
            "gaming pc",
            "console",
            "playstation",
            "xbox",
            "nvidia",
            "amd",
            "intel",
            "hardware",
            "ram",
            "ssd",
        ],
    },
    Subcategory {
        id: "education",
        name: "Education",
        keywords: &[
            "exam",
            "student",
            "study",
            "homework",
            "assignment",
            "college",
            "university",
            "school",
            "cheating",
            "grade",
            "professor",
            "teacher",
            "lecture",
            "class",
            "semester",
            "finals",
            "midterm",
            "quiz",
            "test",
            "project",
            "deadline",
            "submission",
            "lab",
            "tutorial",
            "course",
        ],
    },
];

const ENTERTAINMENT_SUBCATEGORIES: &[Subcategory] = &[
    Subcategory {
        id: "hollywood",
        name: "Hollywood",
        keywords: &["hollywood", "marvel", "dc", "disney", "warner"],
    },
    Subcategory {
        id: "bollywood",
        name: "Bollywood",
        keywords: &["bollywood", "hindi", "mumbai", "shah rukh", "salman"],
    },
    Subcategory {
        id: "anime",
        name: "Anime",
        keywords: &["anime", "manga", "japan", "otaku", "naruto"],
    },
    Subcategory {
        id: "gaming",
        name: "Gaming",
        keywords: &["gaming", "playstation", "xbox", "nintendo", "steam"],
    },
    Subcategory {
        id: "streaming",
        name: "Streaming",
        keywords: &["netflix", "prime", "disney+", "hulu", "streaming"],
    },
];

const POLITICS_SUBCATEGORIES: &[Subcategory] = &[
    Subcategory {
        id: "us_politics",
        name: "US Politics",
        keywords: &["biden", "trump", "democrat", "republican", "congress"],
    },
    Subcategory {
        id: "world_politics",
        name: "World Politics",
        keywords: &["un", "eu", "nato", "summit", "international"],
    },
    Subcategory {
        id: "elections",
        name: "Elections",
        keywords: &["election", "vote", "campaign", "ballot", "polling"],
    },
    Subcategory {
        id: "policy",
        name: "Policy",
        keywords: &["policy", "law", "regulation", "reform", "bill"],
    },
];

impl MemeCategory {
    /// Fixed enumeration order; classification rules walk categories in
    /// exactly this order so rule evaluation stays deterministic.
    pub const ALL: [MemeCategory; 5] = [
        MemeCategory::Sports,
        MemeCategory::Politics,
        MemeCategory::Entertainment,
        MemeCategory::Tech,
        MemeCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MemeCategory::Sports => "Sports",
            MemeCategory::Politics => "Politics",
            MemeCategory::Entertainment => "Entertainment",
            MemeCategory::Tech => "Tech",
            MemeCategory::Other => "Other",
        }
    }

    /// Parses a stored category name, falling back to `Other` for anything
    /// unrecognized.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Sports" => MemeCategory::Sports,
            "Politics" => MemeCategory::Politics,
            "Entertainment" => MemeCategory::Entertainment,
            "Tech" => MemeCategory::Tech,
            _ => MemeCategory::Other,
        }
    }

    pub fn subcategories(&self) -> &'static [Subcategory] {
        match self {
            MemeCategory::Sports => SPORTS_SUBCATEGORIES,
            MemeCategory::Politics => POLITICS_SUBCATEGORIES,
            MemeCategory::Entertainment => ENTERTAINMENT_SUBCATEGORIES,
            MemeCategory::Tech => TECH_SUBCATEGORIES,
            MemeCategory::Other => &[],
        }
    }

    /// Coarser per-category keyword set used when no subcategory matches.
    /// Distinct from the subcategory keyword lists above.
    pub fn coarse_keywords(&self) -> &'static [&'static str] {
        match self {
            MemeCategory::Sports => &[
                "cricket", "ipl", "bcci", "match", "game", "player", "team", "sport",
                "tournament", "stadium", "ball", "bat", "wicket", "over", "run",
            ],
            MemeCategory::Tech => &[
                "programming", "code", "developer", "software", "computer", "tech",
                "ai", "machine learning", "data", "algorithm", "bug", "feature",
            ],
            MemeCategory::Entertainment => &[
                "movie", "film", "actor", "actress", "director", "cinema", "bollywood",
                "hollywood", "show", "series", "episode", "season", "trailer",
            ],
            MemeCategory::Politics => &[
                "politics", "government", "minister", "party", "election", "vote",
                "campaign", "policy", "parliament", "congress", "bjp", "modi",
            ],
            MemeCategory::Other => &[],
        }
    }
}
