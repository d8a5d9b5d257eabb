//! Heuristic parsing of OCR label text
//!
//! All extraction is line- and regex-based:
//! - product name is the first non-empty line
//! - brand is the first of the opening lines that mentions "brand"
//! - each known nutrient is a first-match regex over the whole text
//! - ingredients are the comma-separated tail of the first line that
//!   mentions "ingredient"

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::{Nutrition, ProductInfo};

/// Nutrient keywords the parser recognizes, in fixed order.
pub const NUTRIENTS: [&str; 5] = ["calories", "protein", "carbohydrates", "fat", "sodium"];

/// How many opening lines are scanned for the brand.
const BRAND_SCAN_LINES: usize = 5;

static NUTRIENT_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    NUTRIENTS
        .iter()
        .map(|nutrient| {
            let pattern = format!(r"(?i){}\s*[:\-]?\s*([\d.]+)", nutrient);
            (*nutrient, Regex::new(&pattern).expect("static nutrient pattern"))
        })
        .collect()
});

/// Extract product name, brand, nutrition, and ingredients from OCR text.
pub fn parse_product_info(ocr_text: &str) -> ProductInfo {
    let lines: Vec<&str> = ocr_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let product_name = lines
        .first()
        .map(|line| line.to_string())
        .unwrap_or_else(|| "Unknown Product".to_string());

    let brand = lines
        .iter()
        .take(BRAND_SCAN_LINES)
        .find(|line| line.to_lowercase().contains("brand"))
        .map(|line| line.to_string())
        .unwrap_or_else(|| "Unknown Brand".to_string());

    ProductInfo {
        product_name,
        brand,
        nutrition: parse_nutrition(ocr_text),
        ingredients: extract_ingredients(&lines),
    }
}

/// Return just the ingredient list.
pub fn parse_ingredients(ocr_text: &str) -> Vec<String> {
    parse_product_info(ocr_text).ingredients
}

/// Extract the known nutrition figures. First regex match per nutrient
/// wins; a nutrient that is absent or unparseable reads as zero.
pub fn parse_nutrition(ocr_text: &str) -> Nutrition {
    let mut nutrition = Nutrition::default();

    for (nutrient, pattern) in NUTRIENT_PATTERNS.iter() {
        let value = pattern
            .captures(ocr_text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .unwrap_or(0.0);

        match *nutrient {
            "calories" => nutrition.calories = value,
            "protein" => nutrition.protein = value,
            "carbohydrates" => nutrition.carbohydrates = value,
            "fat" => nutrition.fat = value,
            "sodium" => nutrition.sodium = value,
            _ => unreachable!(),
        }
    }

    nutrition
}

/// The first line mentioning "ingredient" carries the list: everything
/// after the last colon, split on commas. Tokens are trimmed but empty
/// tokens are kept, as a trailing comma on a label produces one.
fn extract_ingredients(lines: &[&str]) -> Vec<String> {
    for &line in lines {
        if line.to_lowercase().contains("ingredient") {
            let tail = line.rsplit(':').next().unwrap_or(line);
            return tail.split(',').map(|token| token.trim().to_string()).collect();
        }
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABEL: &str = "\
Choco Crunch Bar
Brand: SweetCo
Calories: 250
Protein 8
Carbohydrates - 35
Fat: 10.5
Sodium: 200
Ingredients: Sugar, Cocoa, Milk, Soy Lecithin
";

    #[test]
    fn test_product_name_is_first_line() {
        let info = parse_product_info(LABEL);
        assert_eq!(info.product_name, "Choco Crunch Bar");
    }

    #[test]
    fn test_brand_line() {
        let info = parse_product_info(LABEL);
        assert_eq!(info.brand, "Brand: SweetCo");
    }

    #[test]
    fn test_brand_outside_opening_lines_is_not_found() {
        let text = "Product\nline2\nline3\nline4\nline5\nBrand: TooLate";
        let info = parse_product_info(text);
        assert_eq!(info.brand, "Unknown Brand");
    }

    #[test]
    fn test_nutrition_separator_variants() {
        let nutrition = parse_nutrition(LABEL);
        assert_eq!(nutrition.calories, 250.0);
        assert_eq!(nutrition.protein, 8.0);
        assert_eq!(nutrition.carbohydrates, 35.0);
        assert_eq!(nutrition.fat, 10.5);
        assert_eq!(nutrition.sodium, 200.0);
    }

    #[test]
    fn test_missing_nutrients_default_to_zero() {
        let nutrition = parse_nutrition("Plain Crackers\nCalories: 120");
        assert_eq!(nutrition.calories, 120.0);
        assert_eq!(nutrition.protein, 0.0);
        assert_eq!(nutrition.sodium, 0.0);
    }

    #[test]
    fn test_nutrition_first_match_wins() {
        let nutrition = parse_nutrition("Calories: 100\nCalories: 900");
        assert_eq!(nutrition.calories, 100.0);
    }

    #[test]
    fn test_nutrition_is_case_insensitive() {
        let nutrition = parse_nutrition("CALORIES 330\nsodium- 45");
        assert_eq!(nutrition.calories, 330.0);
        assert_eq!(nutrition.sodium, 45.0);
    }

    #[test]
    fn test_garbled_number_reads_as_zero() {
        // OCR noise like "12.5.3" is not a number; the figure degrades to 0.
        let nutrition = parse_nutrition("Calories: 12.5.3");
        assert_eq!(nutrition.calories, 0.0);
    }

    #[test]
    fn test_ingredients_split_and_trimmed() {
        let info = parse_product_info(LABEL);
        assert_eq!(
            info.ingredients,
            vec!["Sugar", "Cocoa", "Milk", "Soy Lecithin"]
        );
    }

    #[test]
    fn test_first_ingredient_line_wins() {
        let text = "Bar\nIngredients: Oats, Honey\nOther ingredients: Salt";
        assert_eq!(parse_ingredients(text), vec!["Oats", "Honey"]);
    }

    #[test]
    fn test_ingredient_line_without_colon() {
        let text = "Bar\ncontains ingredient sugar, salt";
        assert_eq!(
            parse_ingredients(text),
            vec!["contains ingredient sugar", "salt"]
        );
    }

    #[test]
    fn test_ingredient_line_takes_tail_after_last_colon() {
        let text = "Bar\nNote: Ingredients: Water, Barley";
        assert_eq!(parse_ingredients(text), vec!["Water", "Barley"]);
    }

    #[test]
    fn test_trailing_comma_keeps_empty_token() {
        let text = "Bar\nIngredients: Water, Barley,";
        assert_eq!(parse_ingredients(text), vec!["Water", "Barley", ""]);
    }

    #[test]
    fn test_empty_text() {
        let info = parse_product_info("");
        assert_eq!(info.product_name, "Unknown Product");
        assert_eq!(info.brand, "Unknown Brand");
        assert!(info.ingredients.is_empty());
        assert_eq!(info.nutrition, Nutrition::default());
    }
}
