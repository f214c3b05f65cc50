// Point selection and ticket pricing state for one map widget instance.
use super::distance::{
    DistancePriceService, DistanceProvider, PricingOutcome, PricingResult, PricingRule,
};
use super::region::{BoundingBox, Coordinate};
use super::selection::{ClickOutcome, SelectionState, Slot};
use serde::Serialize;

/// Input reported by the map surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapEvent {
    Click { lat: f64, lng: f64 },
    PinActivated(Slot),
}

/// A labelled pin the map surface should draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pin {
    pub slot: Slot,
    pub position: Coordinate,
    pub label: &'static str,
}

/// One pending distance lookup. Owns its inputs so it can be executed
/// independently of the widget.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationRequest {
    seq: u64,
    origin: Coordinate,
    destination: Coordinate,
}

impl CalculationRequest {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn origin(&self) -> Coordinate {
        self.origin
    }

    pub fn destination(&self) -> Coordinate {
        self.destination
    }

    pub fn execute<P: DistanceProvider>(&self, service: &DistancePriceService<P>) -> PricingOutcome {
        service.compute_price(self.origin, self.destination).into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationStatus {
    #[default]
    Idle,
    Computing,
    Succeeded,
    NetworkFailure,
    BelowMinimum,
    MalformedSilent,
}

/// What the widget displays below the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetView {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub distance: Option<String>,
    pub price: Option<String>,
    pub error: Option<String>,
    pub calculate_enabled: bool,
}

impl WidgetView {
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(error) = &self.error {
            lines.push(error.clone());
        }
        if let Some(origin) = &self.origin {
            lines.push(format!("Origin: {}", origin));
        }
        if let Some(destination) = &self.destination {
            lines.push(format!("Destination: {}", destination));
        }
        if let Some(distance) = &self.distance {
            lines.push(format!("Distance: {}", distance));
        }
        if let Some(price) = &self.price {
            lines.push(format!("Ticket Price: {}", price));
        }
        lines
    }
}

pub struct FareWidget {
    region: BoundingBox,
    rule: PricingRule,
    selection: SelectionState,
    result: Option<PricingResult>,
    error: Option<String>,
    status: CalculationStatus,
    next_seq: u64,
    in_flight: usize,
    newest_applied: Option<u64>,
}

impl Default for FareWidget {
    fn default() -> Self {
        Self::new(BoundingBox::default(), PricingRule::default())
    }
}

impl FareWidget {
    pub fn new(region: BoundingBox, rule: PricingRule) -> Self {
        Self {
            region,
            rule,
            selection: SelectionState::new(),
            result: None,
            error: None,
            status: CalculationStatus::Idle,
            next_seq: 0,
            in_flight: 0,
            newest_applied: None,
        }
    }

    pub fn region(&self) -> &BoundingBox {
        &self.region
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn result(&self) -> Option<&PricingResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn status(&self) -> CalculationStatus {
        if self.in_flight > 0 {
            CalculationStatus::Computing
        } else {
            self.status
        }
    }

    pub fn handle_event(&mut self, event: MapEvent) {
        match event {
            MapEvent::Click { lat, lng } => {
                self.on_click(lat, lng);
            }
            MapEvent::PinActivated(slot) => {
                self.on_pin_activated(slot);
            }
        }
    }

    /// Returns `None` when the click was rejected for being out of region.
    pub fn on_click(&mut self, lat: f64, lng: f64) -> Option<ClickOutcome> {
        match self.selection.handle_click(&self.region, lat, lng) {
            Ok(outcome) => {
                self.error = None;
                if let ClickOutcome::Moved(slot) = outcome {
                    // The shown price described the old pin position.
                    if self.result.take().is_some() {
                        log::debug!("{} moved, cleared previous price", slot);
                    }
                }
                Some(outcome)
            }
            Err(e) => {
                log::debug!("Rejected click at {},{}: {}", lat, lng, e);
                self.error = Some(e.to_string());
                None
            }
        }
    }

    pub fn on_pin_activated(&mut self, slot: Slot) -> bool {
        self.selection.activate_edit(slot)
    }

    pub fn pins(&self) -> Vec<Pin> {
        [Slot::Origin, Slot::Destination]
            .into_iter()
            .filter_map(|slot| {
                self.selection.get(slot).map(|position| Pin {
                    slot,
                    position,
                    label: slot.label(),
                })
            })
            .collect()
    }

    pub fn can_calculate(&self) -> bool {
        self.selection.pair().is_some()
    }

    /// Starts a calculation for the current pins, if both are placed.
    pub fn begin_calculation(&mut self) -> Option<CalculationRequest> {
        let (origin, destination) = self.selection.pair()?;
        let request = CalculationRequest {
            seq: self.next_seq,
            origin,
            destination,
        };
        self.next_seq += 1;
        self.in_flight += 1;
        Some(request)
    }

    /// Applies a finished calculation. Completions are applied in delivery
    /// order, so an older request finishing last overwrites a newer answer.
    /// A completion for pins that have since moved is discarded.
    pub fn complete_calculation(&mut self, request: &CalculationRequest, outcome: PricingOutcome) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if self.selection.pair() != Some((request.origin, request.destination)) {
            log::warn!(
                "Discarding calculation #{}: pins moved since it started ({:?})",
                request.seq,
                outcome
            );
            return;
        }
        if let Some(newest) = self.newest_applied {
            if request.seq < newest {
                log::warn!(
                    "Calculation #{} completed after #{}; overwriting the newer result",
                    request.seq,
                    newest
                );
            }
        }
        self.newest_applied = Some(self.newest_applied.map_or(request.seq, |n| n.max(request.seq)));

        self.status = match outcome {
            PricingOutcome::Success(priced) => {
                self.result = Some(priced);
                self.error = None;
                CalculationStatus::Succeeded
            }
            PricingOutcome::NetworkFailure(e) => {
                log::error!("Error fetching distance: {}", e);
                self.error = e.user_message();
                CalculationStatus::NetworkFailure
            }
            PricingOutcome::BelowMinimum(e) => {
                self.error = e.user_message();
                self.result = None;
                CalculationStatus::BelowMinimum
            }
            PricingOutcome::Malformed(e) => {
                log::warn!("Ignoring distance response: {}", e);
                CalculationStatus::MalformedSilent
            }
        };
    }

    /// Runs one calculation to completion on the calling thread.
    pub fn calculate<P: DistanceProvider>(
        &mut self,
        service: &DistancePriceService<P>,
    ) -> CalculationStatus {
        let Some(request) = self.begin_calculation() else {
            log::debug!("Calculate ignored: origin and destination are both required");
            return self.status();
        };
        let outcome = request.execute(service);
        self.complete_calculation(&request, outcome);
        self.status()
    }

    pub fn view(&self) -> WidgetView {
        // Error and price are never shown together.
        let shown = self.result.as_ref().filter(|_| self.error.is_none());
        WidgetView {
            origin: self.selection.origin().map(|c| c.to_string()),
            destination: self.selection.destination().map(|c| c.to_string()),
            distance: shown.map(|r| r.distance_text.clone()),
            price: shown.map(|r| self.rule.format_price(r.price)),
            error: self.error.clone(),
            calculate_enabled: self.can_calculate(),
        }
    }
}
