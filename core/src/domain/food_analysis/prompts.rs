//! Instruction templates sent to the inference backend.
//!
//! Every builder is deterministic. Ingredient names are interpolated verbatim.

/// The kind of task a prompt is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    FoodImage,
    Ingredient,
    Pronunciation,
}

impl PromptKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            PromptKind::FoodImage => "food_image",
            PromptKind::Ingredient => "ingredient",
            PromptKind::Pronunciation => "pronunciation",
        }
    }
}

const FOOD_PROMPT: &str = r#"Analyze this food image and return a JSON response with the following structure:
{
    "food_name": "Name of the food item",
    "estimated_size": "Estimated portion size, e.g. 1 medium apple (182 g)",
    "upc_code": "12-digit UPC code if a barcode or packaged product is visible",
    "upc_confidence": 0.0,
    "nutrition_data": {
        "calories": "estimated calories per serving",
        "protein": "protein content in grams",
        "carbohydrates": "carbohydrate content in grams",
        "fat": "fat content in grams",
        "fiber": "fiber content in grams",
        "sugar": "sugar content in grams",
        "sodium": "sodium content in mg",
        "vitamin_c": "vitamin C content in mg",
        "calcium": "calcium content in mg",
        "iron": "iron content in mg"
    },
    "ingredients": [
        "list of main ingredients",
        "typically found in this food"
    ]
}

Rules:
- Provide realistic estimates based on what you can see in the image.
- Base ingredients and values on products sold in Ontario, Canada.
- Every nutrition value is a string with its unit, e.g. "12 g" or "140 mg".
- "upc_code" must be exactly 12 digits. Omit it if no barcode or packaged product can be identified.
- "upc_confidence" is a number between 0.0 and 1.0 describing how sure you are of "upc_code". Omit it together with "upc_code".
- List ingredients from most to least prominent.
- If you cannot determine certain values, use "unknown" for that field.
- Return only the JSON response, no additional text."#;

const INGREDIENT_PROMPT: &str = r#"Analyze the food ingredient "{ingredient_name}" and return a JSON response with the following structure:
{
    "name": "Common name of the ingredient",
    "pronunciation": "Phonetic pronunciation, e.g. kar-uh-jee-nan",
    "commonly_found_in": "Foods and products that commonly contain it",
    "purpose": "Why it is added to food",
    "natural_or_synthetic": "Natural, synthetic, or both",
    "safety_status": "✅ Safe / ⚠️ Caution / ❌ Danger followed by a short explanation",
    "health_concerns": "✅ / ⚠️ / ❌ followed by known health concerns",
    "recommended_intake": "Recommended or acceptable daily intake"
}

Rules:
- "safety_status" and "health_concerns" must start with exactly one of ✅ (safe), ⚠️ (caution) or ❌ (danger).
- Keep every field to one or two sentences.
- If you cannot determine a field, use "unknown" for that field.
- Return only the JSON response, no additional text."#;

const PRONUNCIATION_PROMPT: &str = r#"Give the phonetic pronunciation of the food ingredient "{ingredient_name}" as a short respelling a text-to-speech engine can read aloud, with syllables separated by hyphens (for example "kar-uh-jee-nan").
Return only the phonetic spelling. No quotes, no explanation, no additional text."#;

const NAME_PLACEHOLDER: &str = "{ingredient_name}";

pub fn build_food_prompt() -> String {
    FOOD_PROMPT.to_string()
}

pub fn build_ingredient_prompt(ingredient_name: &str) -> String {
    INGREDIENT_PROMPT.replace(NAME_PLACEHOLDER, ingredient_name)
}

pub fn build_pronunciation_prompt(ingredient_name: &str) -> String {
    PRONUNCIATION_PROMPT.replace(NAME_PLACEHOLDER, ingredient_name)
}
