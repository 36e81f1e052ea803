//! Built-in plan templates for common MVP types

use crate::types::FormSnapshot;

/// A pre-filled starting point for a common kind of MVP.
#[derive(Debug, Clone)]
pub struct PlanTemplate {
    /// Stable identifier ("ecommerce", "social", ...)
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// One-line flow summary
    pub description: &'static str,
    /// Icon tag for the UI layer
    pub icon: &'static str,
    /// Snapshot the template expands to
    pub snapshot: FormSnapshot,
}

/// All built-in templates.
pub fn templates() -> Vec<PlanTemplate> {
    vec![ecommerce_template(), social_template(), productivity_template()]
}

/// Look up a template by id.
pub fn template(id: &str) -> Option<PlanTemplate> {
    templates().into_iter().find(|t| t.id == id)
}

fn ecommerce_template() -> PlanTemplate {
    PlanTemplate {
        id: "ecommerce",
        name: "E-commerce App",
        description: "Browse → Add to cart → Checkout",
        icon: "shopping-cart",
        snapshot: FormSnapshot {
            problem: "Online shopping is fragmented across multiple platforms, making it hard for customers to find the best deals and for sellers to reach their target audience.".to_string(),
            solution: "A unified marketplace that connects buyers and sellers with smart recommendation algorithms and seamless payment processing.".to_string(),
            target_user: "Young professionals aged 25-35 who shop online frequently".to_string(),
            main_feature: "Product catalog with search and filtering".to_string(),
            supporting_features: vec![
                "Shopping cart and checkout".to_string(),
                "User reviews and ratings".to_string(),
            ],
            user_steps: vec![
                "Browse and search products".to_string(),
                "Add items to cart and review".to_string(),
                "Complete purchase and payment".to_string(),
            ],
            platform: vec!["Web app".to_string(), "Mobile app (iOS/Android)".to_string()],
            tech_needs: "Payment processing, inventory management, user authentication, recommendation engine".to_string(),
            timeframe: "3 months".to_string(),
            ..FormSnapshot::default()
        },
    }
}

fn social_template() -> PlanTemplate {
    PlanTemplate {
        id: "social",
        name: "Social Platform",
        description: "Sign up → Create profile → Connect",
        icon: "users",
        snapshot: FormSnapshot {
            problem: "People struggle to find and connect with others who share their specific interests and hobbies in their local area.".to_string(),
            solution: "A location-based social network that helps people discover and join communities around shared interests.".to_string(),
            target_user: "Adults looking to make new friends and join hobby groups".to_string(),
            main_feature: "Interest-based community discovery".to_string(),
            supporting_features: vec![
                "User profiles and matching".to_string(),
                "Event organization and RSVP".to_string(),
            ],
            user_steps: vec![
                "Create profile and select interests".to_string(),
                "Discover nearby communities and events".to_string(),
                "Join groups and attend events".to_string(),
            ],
            platform: vec!["Mobile app (iOS/Android)".to_string()],
            tech_needs: "Location services, user matching algorithms, event management, messaging system".to_string(),
            timeframe: "2 months".to_string(),
            ..FormSnapshot::default()
        },
    }
}

fn productivity_template() -> PlanTemplate {
    PlanTemplate {
        id: "productivity",
        name: "Productivity Tool",
        description: "Import data → Organize → Take action",
        icon: "clipboard-list",
        snapshot: FormSnapshot {
            problem: "Teams waste time switching between multiple tools to manage projects, track tasks, and communicate progress.".to_string(),
            solution: "An all-in-one workspace that integrates project management, task tracking, and team communication in a single platform.".to_string(),
            target_user: "Small to medium teams (5-20 people) in creative and tech industries".to_string(),
            main_feature: "Unified project and task management".to_string(),
            supporting_features: vec![
                "Team collaboration and messaging".to_string(),
                "Progress tracking and reporting".to_string(),
            ],
            user_steps: vec![
                "Set up project and invite team".to_string(),
                "Create and assign tasks".to_string(),
                "Track progress and communicate updates".to_string(),
            ],
            platform: vec!["Web app".to_string(), "Desktop app".to_string()],
            tech_needs: "Real-time collaboration, file storage, integration APIs, notification system".to_string(),
            timeframe: "3 months".to_string(),
            ..FormSnapshot::default()
        },
    }
}
