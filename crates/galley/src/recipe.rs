//! Recipe data model and the built-in seed corpus

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored recipe document
///
/// Recipes are created by seeding without an embedding; the backfill job
/// attaches one later. Once computed, the embedding has the provider's
/// fixed dimensionality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
  /// Opaque identifier
  pub id: Uuid,

  /// Recipe title
  pub title: String,

  /// Recipe description
  pub description: String,

  /// Text embedding of the description, if computed
  #[serde(skip_serializing_if = "Option::is_none")]
  pub embedding: Option<Vec<f32>>,

  /// When the embedding was computed
  #[serde(skip_serializing_if = "Option::is_none")]
  pub embedding_computed: Option<DateTime<Utc>>,
}

impl Recipe {
  /// Create a new recipe without an embedding
  pub fn new(title: &str, description: &str) -> Self {
    Self {
      id: Uuid::new_v4(),
      title: title.to_string(),
      description: description.to_string(),
      embedding: None,
      embedding_computed: None,
    }
  }

  /// The text the embedding is computed from
  pub fn embedding_text(&self) -> &str {
    &self.description
  }
}

/// The built-in seed corpus of 15 recipes
pub fn seed_corpus() -> Vec<Recipe> {
  vec![
    Recipe::new(
      "Sunset Saffron Risotto",
      "Creamy Arborio rice infused with fragrant saffron and a hint of citrus, served warm with parmesan and fresh herbs.",
    ),
    Recipe::new(
      "Firecracker Chicken Bites",
      "Crispy chicken chunks tossed in a sweet and spicy chili glaze, garnished with sesame seeds and scallions.",
    ),
    Recipe::new(
      "Ocean Breeze Tacos",
      "Soft tortillas filled with grilled mahi-mahi, tangy slaw, and a drizzle of zesty lime crema.",
    ),
    Recipe::new(
      "Garden Harvest Flatbread",
      "A crispy flatbread topped with roasted seasonal vegetables, goat cheese, and a balsamic reduction.",
    ),
    Recipe::new(
      "Savannah Peach Cobbler",
      "Juicy peaches baked beneath a golden, buttery biscuit crust, served hot with a scoop of vanilla ice cream.",
    ),
    Recipe::new(
      "Midnight Truffle Pasta",
      "Black squid ink linguine tossed in a rich truffle cream sauce with wild mushrooms and shaved parmesan.",
    ),
    Recipe::new(
      "Blazing Maple Ribs",
      "Fall-off-the-bone pork ribs glazed with smoky maple barbecue sauce and charred to perfection.",
    ),
    Recipe::new(
      "Crimson Beet Hummus Bowl",
      "A vibrant beet and chickpea hummus served with crunchy pita chips, olives, and fresh cucumber.",
    ),
    Recipe::new(
      "Alpine Melt Burger",
      "Juicy beef patty layered with caramelized onions, Gruyère cheese, and garlic aioli on a toasted brioche bun.",
    ),
    Recipe::new(
      "Coconut Cloud Pudding",
      "Light and fluffy coconut milk pudding topped with toasted coconut flakes and a splash of passionfruit syrup.",
    ),
    Recipe::new(
      "Spicy Mango Salsa",
      "A refreshing blend of ripe mango, red onion, cilantro, and jalapeño, perfect for dipping or topping grilled fish.",
    ),
    Recipe::new(
      "Lavender Lemonade Spritzer",
      "A refreshing drink combining fresh lemonade with a hint of lavender syrup and sparkling water.",
    ),
    Recipe::new(
      "Maple Pecan Granola",
      "Crunchy oats and pecans sweetened with maple syrup, perfect for breakfast or as a snack.",
    ),
    Recipe::new(
      "Crispy Brussels Sprouts Salad",
      "Roasted Brussels sprouts tossed with crispy bacon, dried cranberries, and a tangy apple cider vinaigrette.",
    ),
    Recipe::new(
      "Chocolate Lava Cake",
      "Decadent chocolate cake with a molten center, served warm with a scoop of vanilla ice cream.",
    ),
  ]
}
