//! Trip planning agent.

use std::fmt::Write;

use tracing::info;

use super::info::bullets;
use super::{AgentError, Fields, log_result, run_turn};
use crate::clock::SharedClock;
use crate::subsystems::memory::{ContextMap, TravelMemory};
use crate::subsystems::routing::AgentKind;
use crate::subsystems::tools::label_title;
use crate::subsystems::tools::planning::{self, BudgetDetails, PackingDetails, StayDetails, TripDetails};

pub const APOLOGY: &str = "I encountered an error while processing your travel planning request";

const HELP: &str = "I can help you with travel planning! 🎯\n\n\
Here's what I can do for you:\n\
✈️ **Create detailed itineraries** - Just ask me to plan your trip!\n\
🏨 **Suggest accommodations** - I'll find places to stay within your budget\n\
💰 **Estimate budgets** - Get detailed cost breakdowns for your trip\n\
🎒 **Generate packing lists** - Never forget essentials again\n\n\
Try asking me something like:\n\
• \"Create an itinerary for Paris\"\n\
• \"Suggest hotels in Tokyo\"\n\
• \"Estimate budget for a week in Rome\"\n\
• \"Generate packing list for winter travel\"\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelIntent {
    Itinerary,
    Accommodation,
    Budget,
    Packing,
    Help,
}

impl TravelIntent {
    pub fn detect(request: &str) -> Self {
        let r = request.to_lowercase();
        if r.contains("itinerary") || r.contains("plan") {
            TravelIntent::Itinerary
        } else if r.contains("accommodation") || r.contains("hotel") {
            TravelIntent::Accommodation
        } else if r.contains("budget") || r.contains("cost") {
            TravelIntent::Budget
        } else if r.contains("pack") {
            TravelIntent::Packing
        } else {
            TravelIntent::Help
        }
    }
}

pub struct TravelAgent {
    clock: SharedClock,
}

impl TravelAgent {
    pub const NAME: &'static str = "TravelAgent";

    pub fn new(clock: SharedClock) -> Self {
        Self { clock }
    }

    pub fn process_request(
        &self,
        memory: &mut TravelMemory,
        request: &str,
        context: &ContextMap,
    ) -> Result<String, AgentError> {
        let intent = TravelIntent::detect(request);
        info!(agent = Self::NAME, ?intent, "agent: handling request");
        run_turn(memory, AgentKind::Travel.name(), request, APOLOGY, |memory| {
            self.respond(memory, intent, context)
        })
    }

    fn respond(&self, memory: &mut TravelMemory, intent: TravelIntent, context: &ContextMap) -> Result<String, AgentError> {
        let fields = Fields(context);
        let destination = fields.text("destination", "Unknown");
        let mut out = String::new();

        match intent {
            TravelIntent::Itinerary => {
                let today = self.clock.now().format("%Y-%m-%d").to_string();
                let details = TripDetails {
                    destination: destination.clone(),
                    duration: fields.count("duration", 3),
                    start_date: Some(fields.text("travel_date", &today)),
                    interests: fields.list("interests"),
                    budget_level: fields.text("budget_level", "medium"),
                    travelers: fields.count("travelers", 2),
                };
                let result = planning::create_itinerary(&details);
                let query = format!(
                    "itinerary_{destination}_{}",
                    details.start_date.as_deref().unwrap_or_default()
                );
                log_result(memory, query, &result, Self::NAME)?;

                writeln!(out, "✈️ Travel Itinerary for {destination}:\n")?;
                match result {
                    Ok(it) => {
                        let interests = if it.interests.is_empty() {
                            "General".to_string()
                        } else {
                            it.interests.join(", ")
                        };
                        writeln!(out, "📅 Duration: {}", it.duration)?;
                        writeln!(out, "👥 Travelers: {}", it.travelers)?;
                        writeln!(out, "💰 Budget Level: {}", it.budget_level)?;
                        writeln!(out, "🎯 Interests: {interests}\n")?;
                        for day in &it.daily_plans {
                            writeln!(out, "📅 **Day {} - {}**", day.day, day.date)?;
                            writeln!(out, "🎭 Theme: {}\n", day.theme)?;
                            for a in day.activities {
                                writeln!(out, "  ⏰ {} - {}", a.time, a.activity)?;
                                writeln!(out, "      ⏱️ Duration: {} | 💰 Cost: ${}", a.duration, a.cost)?;
                            }
                            writeln!(out, "\n  📊 Daily Budget: ${}", day.estimated_daily_cost)?;
                            writeln!(out, "  💡 Tips:")?;
                            for tip in day.travel_tips {
                                writeln!(out, "    • {tip}")?;
                            }
                            writeln!(out)?;
                        }
                        writeln!(out, "📈 **Trip Summary:**")?;
                        writeln!(out, "• Total Activities: {}", it.summary.total_activities)?;
                        writeln!(out, "• Estimated Cost: ${}", it.summary.estimated_cost)?;
                        writeln!(out, "• Top Highlights: {}", it.summary.highlights.join(", "))?;
                    }
                    Err(e) => write!(out, "{e}")?,
                }
            }
            TravelIntent::Accommodation => {
                let details = StayDetails {
                    destination: destination.clone(),
                    budget_level: fields.text("budget_level", "medium"),
                    travelers: fields.count("travelers", 2),
                    duration: fields.count("duration", 3),
                    preferences: fields.list("preferences"),
                };
                let result = planning::suggest_accommodations(&details);
                log_result(memory, format!("accommodations_{destination}"), &result, Self::NAME)?;

                writeln!(out, "🏨 Accommodation Suggestions for {destination}:\n")?;
                match result {
                    Ok(stay) => {
                        for (i, o) in stay.options.iter().enumerate() {
                            writeln!(out, "{}. **{}** ({})", i + 1, o.name, o.kind)?;
                            writeln!(out, "   ⭐ Rating: {}/5 ({})", o.rating, o.category)?;
                            writeln!(out, "   💰 Price: {} per night", o.price_per_night)?;
                            writeln!(out, "   💳 Total Cost: {} for {} nights", o.total_cost, details.duration)?;
                            writeln!(out, "   📍 Location: {}", o.location)?;
                            writeln!(out, "   🚶 Distance to Center: {}", o.distance_to_center)?;
                            writeln!(out, "   🚇 Transport: {}", o.transport_access)?;
                            writeln!(out, "   🎯 Amenities: {}", o.amenities.join(", "))?;
                            writeln!(out, "   💬 Guest Rating: {}", o.guest_rating)?;
                            writeln!(out, "   ✅ Pros: {}", o.pros.join(", "))?;
                            writeln!(out, "   ⚠️ Cons: {}\n", o.cons.join(", "))?;
                        }
                        writeln!(out, "💡 **Booking Tips:**")?;
                        bullets(&mut out, stay.booking_recommendations)?;
                    }
                    Err(e) => write!(out, "{e}")?,
                }
            }
            TravelIntent::Budget => {
                let details = BudgetDetails {
                    destination: destination.clone(),
                    duration: fields.count("duration", 3),
                    travelers: fields.count("travelers", 1),
                    budget_level: fields.text("budget_level", "medium"),
                    planned_activities: fields.list("interests"),
                };
                let result = planning::estimate_budget(&details);
                let query = format!("budget_{destination}_{}days", details.duration);
                log_result(memory, query, &result, Self::NAME)?;

                writeln!(out, "💰 Budget Estimate for {destination}:\n")?;
                match result {
                    Ok(b) => {
                        writeln!(out, "📅 Duration: {}", b.duration)?;
                        writeln!(out, "👥 Travelers: {}", b.travelers)?;
                        writeln!(out, "💎 Budget Level: {}\n", b.budget_level)?;
                        writeln!(out, "📊 **Daily Breakdown:**")?;
                        for (category, line) in &b.detailed_breakdown.daily_costs {
                            writeln!(out, "• {}: {} per day → {} total", label_title(category), line.amount, line.total)?;
                            writeln!(out, "  └─ {}", line.description)?;
                        }
                        writeln!(out, "\n💸 **One-time Costs:**")?;
                        for (category, cost) in &b.detailed_breakdown.one_time_costs {
                            writeln!(out, "• {}: {cost}", label_title(category))?;
                        }
                        writeln!(out, "\n📈 **Total Summary:**")?;
                        writeln!(out, "• Daily Average: {}", b.totals.daily_average)?;
                        writeln!(out, "• Trip Total (before flights): {}", b.totals.trip_total_before_flights)?;
                        writeln!(out, "• Flights & Fees: {}", b.totals.flights_and_fees)?;
                        writeln!(out, "• **Grand Total per Person: {}**", b.totals.grand_total_per_person)?;
                        writeln!(out, "• **Grand Total for Group: {}**", b.totals.grand_total_for_group)?;
                        writeln!(out, "\n🚨 **Emergency Fund:** {}", b.emergency_fund.recommended)?;
                        writeln!(out, "({})", b.emergency_fund.description)?;
                        writeln!(out, "\n💡 **Money-Saving Tips:**")?;
                        bullets(&mut out, b.budget_tips.save_money)?;
                    }
                    Err(e) => write!(out, "{e}")?,
                }
            }
            TravelIntent::Packing => {
                let details = PackingDetails {
                    destination: destination.clone(),
                    duration: fields.count("duration", 3),
                    season: fields.text("season", "spring"),
                    planned_activities: fields.list("interests"),
                    budget_level: fields.text("budget_level", "medium"),
                };
                let result = planning::generate_packing_list(&details);
                let query = format!("packing_list_{destination}_{}", details.season);
                log_result(memory, query, &result, Self::NAME)?;

                writeln!(out, "🎒 Packing List for {destination}:\n")?;
                match result {
                    Ok(p) => {
                        let activities = if p.activities.is_empty() {
                            "General travel".to_string()
                        } else {
                            p.activities.join(", ")
                        };
                        let cats = &p.categories;
                        writeln!(out, "📅 Duration: {}", p.duration)?;
                        writeln!(out, "🌤️ Season: {}", p.season)?;
                        writeln!(out, "🎯 Activities: {activities}\n")?;
                        writeln!(out, "📋 **Essential Documents:**")?;
                        bullets(&mut out, cats.essentials.documents)?;
                        writeln!(out, "\n💳 **Money & Cards:**")?;
                        bullets(&mut out, cats.essentials.money_and_cards)?;
                        writeln!(out, "\n👔 **Clothing Basics:**")?;
                        for item in &cats.clothing.basics {
                            writeln!(out, "• {item}")?;
                        }
                        if !cats.clothing.weather_specific.is_empty() {
                            writeln!(out, "\n🌦️ **Weather-Specific ({}):**", p.season)?;
                            bullets(&mut out, cats.clothing.weather_specific)?;
                        }
                        if !cats.clothing.activity_specific.is_empty() {
                            writeln!(out, "\n🎯 **Activity-Specific:**")?;
                            bullets(&mut out, &cats.clothing.activity_specific)?;
                        }
                        let rest = [
                            ("🧴 Health & Hygiene", cats.health_and_hygiene),
                            ("🔌 Electronics", cats.electronics),
                            ("🎒 Comfort & Convenience", cats.comfort_and_convenience),
                        ];
                        for (title, items) in rest {
                            writeln!(out, "\n{title}:")?;
                            bullets(&mut out, items)?;
                        }
                        writeln!(out, "\n💡 **Packing Tips:**")?;
                        bullets(&mut out, &p.packing_tips)?;
                    }
                    Err(e) => write!(out, "{e}")?,
                }
            }
            TravelIntent::Help => out.push_str(HELP),
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::clock::ManualClock;

    fn agent() -> TravelAgent {
        TravelAgent::new(Arc::new(ManualClock::at_date(2025, 5, 10).unwrap()))
    }

    #[test]
    fn intent_order() {
        assert_eq!(TravelIntent::detect("plan my hotel budget"), TravelIntent::Itinerary);
        assert_eq!(TravelIntent::detect("hotel costs"), TravelIntent::Accommodation);
        assert_eq!(TravelIntent::detect("what will it cost"), TravelIntent::Budget);
        assert_eq!(TravelIntent::detect("what to pack"), TravelIntent::Packing);
        assert_eq!(TravelIntent::detect("book a flight"), TravelIntent::Help);
    }

    #[test]
    fn itinerary_defaults_to_today_and_three_days() {
        let mut memory = TravelMemory::new();
        let mut ctx = ContextMap::new();
        ctx.set("destination", "Paris");
        let reply = agent().process_request(&mut memory, "Plan my trip", &ctx).unwrap();
        assert!(reply.contains("📅 Duration: 3 days"));
        assert!(reply.contains("📅 **Day 1 - 2025-05-10**"));
        assert!(reply.contains("📅 **Day 3 - 2025-05-12**"));
        assert!(reply.contains("🎯 Interests: General"));
        assert!(reply.contains("• Estimated Cost: $440"));
        assert_eq!(memory.search_history()[0].query, "itinerary_Paris_2025-05-10");
    }

    #[test]
    fn itinerary_with_free_text_date_renders_tool_error() {
        let mut memory = TravelMemory::new();
        let mut ctx = ContextMap::new();
        ctx.set("travel_date", "june 12");
        let reply = agent().process_request(&mut memory, "itinerary", &ctx).unwrap();
        assert_eq!(
            reply,
            "✈️ Travel Itinerary for Unknown:\n\nFailed to create itinerary: invalid start date 'june 12' (expected YYYY-MM-DD)"
        );
        assert!(memory.search_history()[0].results["error"].is_string());
    }

    #[test]
    fn budget_defaults_to_one_traveler() {
        let mut memory = TravelMemory::new();
        let reply = agent().process_request(&mut memory, "budget?", &ContextMap::new()).unwrap();
        assert!(reply.contains("👥 Travelers: 1"));
        assert!(reply.contains("• Local Transport: $15 per day → $45 total"));
        assert!(reply.contains("• **Grand Total per Person: $1485**"));
    }

    #[test]
    fn unknown_budget_level_is_rendered_not_raised() {
        let mut memory = TravelMemory::new();
        let mut ctx = ContextMap::new();
        ctx.set("budget_level", "shoestring");
        let reply = agent().process_request(&mut memory, "cost", &ctx).unwrap();
        assert!(reply.ends_with("Failed to estimate budget: unknown budget level 'shoestring'"));
    }

    #[test]
    fn packing_uses_context_season() {
        let mut memory = TravelMemory::new();
        let mut ctx = ContextMap::new();
        ctx.set("season", "winter");
        ctx.set("interests", vec!["beach".to_string()]);
        let reply = agent().process_request(&mut memory, "packing list", &ctx).unwrap();
        assert!(reply.contains("🌦️ **Weather-Specific (winter):**"));
        assert!(reply.contains("• Beach towel"));
        assert_eq!(memory.search_history()[0].query, "packing_list_Unknown_winter");
    }

    #[test]
    fn help_text_for_unmatched_request() {
        let mut memory = TravelMemory::new();
        let reply = agent().process_request(&mut memory, "book a flight", &ContextMap::new()).unwrap();
        assert!(reply.starts_with("I can help you with travel planning! 🎯"));
        assert!(memory.search_history().is_empty());
        assert_eq!(memory.conversation_history().len(), 2);
    }
}
