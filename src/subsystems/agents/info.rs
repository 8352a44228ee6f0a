//! Destination information agent.

use std::fmt::Write;

use tracing::info;

use super::{AgentError, Fields, log_result, run_turn};
use crate::clock::SharedClock;
use crate::subsystems::memory::{ContextMap, TravelMemory};
use crate::subsystems::routing::AgentKind;
use crate::subsystems::tools::{NoteTable, info as tools, label_title};

pub const APOLOGY: &str = "I encountered an error while processing your request";

/// Intent, checked in declaration order against the lower-cased request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoIntent {
    Weather,
    Attractions,
    Tips,
    Currency,
    Overview,
}

impl InfoIntent {
    pub fn detect(request: &str) -> Self {
        let r = request.to_lowercase();
        if r.contains("weather") {
            InfoIntent::Weather
        } else if r.contains("attractions") || r.contains("things to do") {
            InfoIntent::Attractions
        } else if r.contains("tips") || r.contains("advice") {
            InfoIntent::Tips
        } else if r.contains("currency") || r.contains("money") {
            InfoIntent::Currency
        } else {
            InfoIntent::Overview
        }
    }
}

pub struct InfoAgent {
    clock: SharedClock,
}

impl InfoAgent {
    pub const NAME: &'static str = "InfoAgent";

    pub fn new(clock: SharedClock) -> Self {
        Self { clock }
    }

    pub fn process_request(
        &self,
        memory: &mut TravelMemory,
        request: &str,
        context: &ContextMap,
    ) -> Result<String, AgentError> {
        let intent = InfoIntent::detect(request);
        info!(agent = Self::NAME, ?intent, "agent: handling request");
        run_turn(memory, AgentKind::Info.name(), request, APOLOGY, |memory| {
            self.respond(memory, intent, context)
        })
    }

    fn respond(&self, memory: &mut TravelMemory, intent: InfoIntent, context: &ContextMap) -> Result<String, AgentError> {
        let fields = Fields(context);
        let destination = fields.text("destination", "Unknown");
        let mut out = String::new();

        match intent {
            InfoIntent::Weather => {
                let date = fields.opt_text("travel_date");
                let result = tools::weather_info(&destination, date.as_deref(), self.clock.now().date_naive());
                let query = format!("weather_{destination}_{}", date.as_deref().unwrap_or("None"));
                log_result(memory, query, &result, Self::NAME)?;

                writeln!(out, "🌤️ Weather information for {destination}:\n")?;
                match result {
                    Ok(w) => {
                        writeln!(out, "📅 Date: {}", w.date)?;
                        writeln!(out, "🌡️ Temperature: {} (Range: {})", w.current_temperature, w.temperature_range)?;
                        writeln!(out, "☁️ Conditions: {}", w.conditions)?;
                        writeln!(out, "💧 Humidity: {}", w.humidity)?;
                        writeln!(out, "🌧️ Precipitation: {}", w.precipitation)?;
                        writeln!(out, "💨 Wind: {}", w.wind)?;
                        writeln!(out, "☀️ UV Index: {}\n", w.uv_index)?;
                        writeln!(out, "📋 Recommendations:")?;
                        bullets(&mut out, w.recommendations)?;
                    }
                    Err(e) => write!(out, "{e}")?,
                }
            }
            InfoIntent::Attractions => {
                let interests = fields.list("interests");
                let result = tools::search_attractions(&destination, &interests);
                log_result(memory, format!("attractions_{destination}"), &result, Self::NAME)?;

                writeln!(out, "🎯 Attractions in {destination}:\n")?;
                match result {
                    Ok(found) => {
                        write!(out, "Found {} attractions", found.total_found)?;
                        if !interests.is_empty() {
                            write!(out, " matching your interests: {}", interests.join(", "))?;
                        }
                        writeln!(out, "\n")?;
                        for (i, a) in found.attractions.iter().take(5).enumerate() {
                            writeln!(out, "{}. **{}** ({})", i + 1, a.name, a.kind)?;
                            writeln!(out, "   ⭐ Rating: {}/5", a.rating)?;
                            writeln!(out, "   📝 {}", a.description)?;
                            writeln!(out, "   ⏱️ Duration: {}", a.estimated_time)?;
                            writeln!(out, "   💰 Cost: {}", a.cost)?;
                            writeln!(out, "   📍 {}\n", a.address)?;
                        }
                        writeln!(out, "💡 Planning Tips:")?;
                        bullets(&mut out, found.planning_tips)?;
                    }
                    Err(e) => write!(out, "{e}")?,
                }
            }
            InfoIntent::Tips => {
                let result = tools::travel_tips(&destination);
                log_result(memory, format!("travel_tips_{destination}"), &result, Self::NAME)?;

                writeln!(out, "💡 Travel Tips for {destination}:\n")?;
                match result {
                    Ok(tips) => {
                        let sections = [
                            ("🏛️ Cultural Tips", tips.cultural_tips),
                            ("🛡️ Safety Tips", tips.safety_tips),
                            ("💰 Money Tips", tips.money_tips),
                            ("🎒 Practical Tips", tips.practical_tips),
                        ];
                        for (title, items) in sections {
                            writeln!(out, "{title}:")?;
                            bullets(&mut out, items)?;
                            writeln!(out)?;
                        }
                    }
                    Err(e) => write!(out, "{e}")?,
                }
            }
            InfoIntent::Currency => {
                let result = tools::currency_info(&destination, self.clock.now());
                log_result(memory, format!("currency_{destination}"), &result, Self::NAME)?;

                writeln!(out, "💱 Currency Information for {destination}:\n")?;
                match result {
                    Ok(c) => {
                        writeln!(out, "💰 Currency: {} ({})", c.currency_name, c.currency_code)?;
                        writeln!(out, "💱 Exchange Rate: {}", c.exchange_rate)?;
                        writeln!(out, "📅 Last Updated: {}\n", c.last_updated)?;
                        writeln!(out, "💳 Payment Methods:")?;
                        labelled(&mut out, &c.payment_methods)?;
                        writeln!(out, "\n🏧 ATM Information:")?;
                        labelled(&mut out, &c.atm_availability)?;
                        writeln!(out, "\n💸 Tipping Culture:")?;
                        labelled(&mut out, &c.tipping_culture)?;
                    }
                    Err(e) => write!(out, "{e}")?,
                }
            }
            InfoIntent::Overview => {
                let result = tools::destination_info(&destination);
                log_result(memory, format!("destination_info_{destination}"), &result, Self::NAME)?;

                writeln!(out, "📍 Information about {destination}:\n")?;
                match result {
                    Ok(d) => {
                        writeln!(out, "📝 Description: {}\n", d.description)?;
                        writeln!(out, "🌅 Best Time to Visit: {}", d.best_time_to_visit)?;
                        writeln!(out, "🗣️ Language: {}", d.local_language)?;
                        writeln!(out, "🕐 Timezone: {}", d.time_zone)?;
                        writeln!(out, "📋 Visa Requirements: {}", d.visa_requirements)?;
                        writeln!(out, "🆘 Emergency Contacts: {}", d.emergency_contacts)?;
                        writeln!(out, "💰 Currency: {}", d.currency)?;
                        writeln!(out, "🌡️ Climate: {}", d.climate)?;
                    }
                    Err(e) => write!(out, "{e}")?,
                }
            }
        }

        Ok(out)
    }
}

pub(crate) fn bullets(out: &mut String, items: &[&str]) -> std::fmt::Result {
    for item in items {
        writeln!(out, "• {item}")?;
    }
    Ok(())
}

fn labelled(out: &mut String, table: &NoteTable) -> std::fmt::Result {
    for (key, note) in table {
        writeln!(out, "• {}: {note}", label_title(key))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::clock::ManualClock;
    use crate::subsystems::memory::Role;

    fn agent() -> InfoAgent {
        InfoAgent::new(Arc::new(ManualClock::at_date(2025, 4, 20).unwrap()))
    }

    fn ctx(destination: &str) -> ContextMap {
        let mut c = ContextMap::new();
        c.set("destination", destination);
        c
    }

    #[test]
    fn intent_order() {
        assert_eq!(InfoIntent::detect("weather and attractions"), InfoIntent::Weather);
        assert_eq!(InfoIntent::detect("Things to do"), InfoIntent::Attractions);
        assert_eq!(InfoIntent::detect("money tips"), InfoIntent::Tips);
        assert_eq!(InfoIntent::detect("exchange money"), InfoIntent::Currency);
        assert_eq!(InfoIntent::detect("tell me about it"), InfoIntent::Overview);
    }

    #[test]
    fn weather_reply_uses_clock_date_and_logs_turns() {
        let mut memory = TravelMemory::new();
        let reply = agent()
            .process_request(&mut memory, "What's the weather like?", &ctx("Tokyo"))
            .unwrap();
        assert!(reply.starts_with("🌤️ Weather information for Tokyo:"));
        assert!(reply.contains("📅 Date: 2025-04-20"));
        assert!(reply.contains("• Comfortable walking shoes are essential"));

        let log = memory.conversation_history();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].role, Role::User);
        assert_eq!(log[1].agent.as_deref(), Some("InfoAgent"));
        assert_eq!(memory.search_history()[0].query, "weather_Tokyo_None");
    }

    #[test]
    fn attractions_reply_shows_top_five() {
        let mut memory = TravelMemory::new();
        let reply = agent()
            .process_request(&mut memory, "attractions please", &ContextMap::new())
            .unwrap();
        assert!(reply.contains("🎯 Attractions in Unknown:"));
        assert!(reply.contains("Found 6 attractions\n\n"));
        assert!(reply.contains("5. **Adventure Park** (Recreation)"));
        assert!(!reply.contains("Local Cultural Center"));
    }

    #[test]
    fn currency_reply_titles_labels() {
        let mut memory = TravelMemory::new();
        let reply = agent()
            .process_request(&mut memory, "currency?", &ctx("Japan"))
            .unwrap();
        assert!(reply.contains("• Credit Cards: Visa and Mastercard"));
        assert!(reply.contains("📅 Last Updated: 2025-04-20 09:00"));
        let logged = &memory.search_history()[0].results;
        assert_eq!(logged["currency_code"], "LC");
    }
}
