use crate::types::ModelName;

const SKELETON_PARTS: &[&str] = &[
    "Skull",
    "Mandible",
    "Clavicle",
    "Scapula",
    "Sternum",
    "Ribs",
    "Spine",
    "Humerus",
    "Radius",
    "Ulna",
    "Pelvis",
    "Femur",
    "Patella",
    "Tibia",
    "Fibula",
];

const BODY_PARTS: &[&str] = &[
    "Head",
    "Neck",
    "Chest",
    "Abdomen",
    "Shoulder",
    "Arm",
    "Elbow",
    "Hand",
    "Hip",
    "Thigh",
    "Knee",
    "Leg",
    "Foot",
];

const ORGAN_PARTS: &[&str] = &[
    "Brain",
    "Heart",
    "Lungs",
    "Liver",
    "Stomach",
    "Pancreas",
    "Spleen",
    "Kidneys",
    "SmallIntestine",
    "LargeIntestine",
    "Bladder",
];

/// The fixed list of addressable parts for each model. Quiz questions and
/// the tour walk follow this order.
#[derive(Clone, Debug)]
pub struct BodyPartCatalog {
    skeleton: Vec<String>,
    body: Vec<String>,
    organs: Vec<String>,
}

impl BodyPartCatalog {
    pub fn new(skeleton: Vec<String>, body: Vec<String>, organs: Vec<String>) -> Self {
        Self {
            skeleton,
            body,
            organs,
        }
    }

    pub fn parts(&self, model: ModelName) -> &[String] {
        match model {
            ModelName::Skeleton => &self.skeleton,
            ModelName::Body => &self.body,
            ModelName::Organs => &self.organs,
        }
    }

    pub fn contains(&self, model: ModelName, part_id: &str) -> bool {
        self.parts(model).iter().any(|part| part == part_id)
    }

    pub fn part(&self, model: ModelName, index: usize) -> Option<&str> {
        self.parts(model).get(index).map(String::as_str)
    }

    pub fn len(&self, model: ModelName) -> usize {
        self.parts(model).len()
    }
}

impl Default for BodyPartCatalog {
    fn default() -> Self {
        let owned = |parts: &[&str]| parts.iter().map(|part| part.to_string()).collect();
        Self::new(owned(SKELETON_PARTS), owned(BODY_PARTS), owned(ORGAN_PARTS))
    }
}
