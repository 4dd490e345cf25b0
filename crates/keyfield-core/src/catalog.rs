//! Static project catalog and the keyword vocabulary derived from it.

use fnv::FnvHashSet;
use serde::{Deserialize, Serialize};

/// One unlockable portfolio entry. Immutable once the catalog is built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub full_sentence: String,
    pub keywords: Vec<String>,
    pub description: String,
    pub image: String,
    pub year: String,
}

impl Project {
    pub fn has_keyword(&self, word: &str) -> bool {
        self.keywords.iter().any(|k| k == word)
    }
}

struct ProjectSeed {
    id: &'static str,
    name: &'static str,
    full_sentence: &'static str,
    keywords: &'static [&'static str],
    description: &'static str,
    image: &'static str,
    year: &'static str,
}

const PROJECTS: &[ProjectSeed] = &[
    ProjectSeed {
        id: "echo-chamber",
        name: "ECHO CHAMBER",
        full_sentence: "In the resonance of digital space, we find echoes of our own identity reflected through the network of human connection.",
        keywords: &["RESONANCE", "ECHO", "IDENTITY", "NETWORK", "CONNECTION", "DIGITAL", "SPACE"],
        description: "An interactive installation exploring how digital environments shape and reflect our sense of self. Through real-time audio visualization, participants witness their voices transformed into visual echoes that persist and interact with others in the space.",
        image: "assets/projects/echo-chamber.jpg",
        year: "2024",
    },
    ProjectSeed {
        id: "flux-state",
        name: "FLUX STATE",
        full_sentence: "The flow of data creates patterns that reveal the hidden momentum and rhythm beneath the chaos of information.",
        keywords: &["FLOW", "DATA", "PATTERN", "MOMENTUM", "RHYTHM", "CHAOS", "VISUALIZATION"],
        description: "A generative visualization system that transforms live data streams into organic, flowing forms. The piece explores how we can find beauty and meaning in the constant flux of digital information.",
        image: "assets/projects/flux-state.jpg",
        year: "2024",
    },
    ProjectSeed {
        id: "void-interface",
        name: "VOID INTERFACE",
        full_sentence: "At the boundary between void and form, the interface becomes a membrane where human and machine negotiate meaning.",
        keywords: &["VOID", "FORM", "INTERFACE", "HUMAN", "SYSTEM", "INTERACTION", "DESIGN"],
        description: "An experimental interface design that challenges traditional notions of user interaction. By embracing negative space and ambiguity, it creates moments of contemplation within digital experiences.",
        image: "assets/projects/void-interface.jpg",
        year: "2023",
    },
    ProjectSeed {
        id: "particle-memory",
        name: "PARTICLE MEMORY",
        full_sentence: "Memory exists as particles suspended in time, each fragment carrying the texture and light of lived experience.",
        keywords: &["PARTICLE", "MEMORY", "TIME", "TEXTURE", "LIGHT", "FIELD", "EXPERIENCE"],
        description: "A WebGL experience that visualizes personal memories as particle systems. Users can navigate through clouds of particles, each cluster representing a memory that reveals itself through interaction.",
        image: "assets/projects/particle-memory.jpg",
        year: "2023",
    },
    ProjectSeed {
        id: "signal-noise",
        name: "SIGNAL / NOISE",
        full_sentence: "In the frequency of modern existence, we must learn to distinguish signal from noise, finding harmony in dissonance.",
        keywords: &["SIGNAL", "NOISE", "FREQUENCY", "HARMONY", "DISSONANCE", "WAVE", "SENSE"],
        description: "An audiovisual performance piece that explores the threshold between meaningful communication and noise. Using custom software, performers modulate between clarity and chaos.",
        image: "assets/projects/signal-noise.jpg",
        year: "2023",
    },
];

const FILLER_KEYWORDS: &[&str] = &[
    "WEBGL", "THREE.JS", "CREATIVE", "CODING", "FUTURE",
    "ORDER", "ART", "ALGORITHM", "GENERATIVE",
    "VIRTUAL", "REALITY", "SHADOW", "FUNCTION", "PROCESS",
    "ENTROPY", "SYNTHESIS", "KINETIC", "CYBERNETIC",
    "GRAVITY", "HORIZON", "PERSPECTIVE", "DIMENSION", "SCALE",
    "VECTOR", "TENSOR", "MATRIX", "NODE", "EDGE", "GRAPH", "TOPOLOGY", "MANIFOLD",
    "PROTOTYPE", "FEEDBACK", "LOOP", "CYCLE", "ITERATION",
    "CONCEPT", "THEORY", "PRACTICE", "METHOD", "APPROACH",
    "SURFACE", "DEPTH", "LAYER", "CORE", "SHELL",
    "EXPAND", "CONTRACT", "ROTATE", "TRANSLATE", "TRANSFORM",
    "PIXEL", "VOXEL", "MESH", "VERTEX", "POLYGON",
    "RENDER", "COMPUTE", "STREAM", "BUFFER",
    "INPUT", "OUTPUT", "STATE", "EVENT", "TRIGGER",
    "FEEL", "TOUCH", "SIGHT", "SOUND",
    "IMMERSIVE", "NARRATIVE", "STRUCTURE", "MOTION",
];

/// Ordered project list plus the filler words that pad out the field.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    projects: Vec<Project>,
    filler: Vec<String>,
}

impl Catalog {
    pub fn new(projects: Vec<Project>, filler: Vec<String>) -> Self {
        Self { projects, filler }
    }

    /// The five built-in portfolio projects and the default filler vocabulary.
    pub fn builtin() -> Self {
        let projects = PROJECTS
            .iter()
            .map(|p| Project {
                id: p.id.to_string(),
                name: p.name.to_string(),
                full_sentence: p.full_sentence.to_string(),
                keywords: p.keywords.iter().map(|k| k.to_string()).collect(),
                description: p.description.to_string(),
                image: p.image.to_string(),
                year: p.year.to_string(),
            })
            .collect();
        let filler = FILLER_KEYWORDS.iter().map(|k| k.to_string()).collect();
        Self::new(projects, filler)
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Projects whose keyword set contains `word`, in catalog order.
    pub fn projects_with_keyword<'a>(&'a self, word: &'a str) -> impl Iterator<Item = &'a Project> + 'a {
        self.projects.iter().filter(move |p| p.has_keyword(word))
    }

    /// Project keywords (first occurrence order) followed by filler words not
    /// already present. Every word appears once.
    pub fn vocabulary(&self) -> Vec<String> {
        let mut seen = FnvHashSet::default();
        let mut words = Vec::new();
        let project_words = self.projects.iter().flat_map(|p| p.keywords.iter());
        for w in project_words.chain(self.filler.iter()) {
            if seen.insert(w.as_str()) {
                words.push(w.clone());
            }
        }
        words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_projects_have_five_to_eight_keywords() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.projects().len(), 5);
        for p in catalog.projects() {
            assert!((5..=8).contains(&p.keywords.len()), "{} has {}", p.id, p.keywords.len());
        }
    }

    #[test]
    fn vocabulary_is_deduplicated_and_project_words_come_first() {
        let catalog = Catalog::builtin();
        let vocab = catalog.vocabulary();
        let unique: FnvHashSet<&str> = vocab.iter().map(|s| s.as_str()).collect();
        assert_eq!(unique.len(), vocab.len());
        assert_eq!(vocab[0], "RESONANCE");
        let first_filler = vocab.iter().position(|w| w == "WEBGL").unwrap();
        assert_eq!(first_filler, 35);
    }

    #[test]
    fn filler_already_in_a_project_is_not_repeated() {
        let p = Project {
            id: "p".into(),
            name: "P".into(),
            full_sentence: String::new(),
            keywords: vec!["ART".into(), "CORE".into()],
            description: String::new(),
            image: String::new(),
            year: String::new(),
        };
        let catalog = Catalog::new(vec![p], vec!["CORE".into(), "EDGE".into()]);
        assert_eq!(catalog.vocabulary(), vec!["ART", "CORE", "EDGE"]);
    }
}
