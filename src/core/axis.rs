use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexSet;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_seconds, decimal_to_f64};
use crate::core::{LinearScale, Rect};
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AxisId(pub u32);

impl fmt::Display for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "axis#{}", self.0)
    }
}

/// Which plot direction an axis drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisType {
    /// Horizontal axis.
    First,
    /// Vertical axis.
    Second,
}

/// Logical value an annotation binds to an axis.
#[derive(Debug, Clone, PartialEq)]
pub enum AxisValue {
    Number(f64),
    Decimal(Decimal),
    Category(String),
    Date(DateTime<Utc>),
}

impl AxisValue {
    #[must_use]
    pub fn category(name: impl Into<String>) -> Self {
        Self::Category(name.into())
    }
}

impl From<f64> for AxisValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Decimal> for AxisValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<DateTime<Utc>> for AxisValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

impl From<&str> for AxisValue {
    fn from(value: &str) -> Self {
        Self::Category(value.to_owned())
    }
}

impl fmt::Display for AxisValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Decimal(value) => write!(f, "{value}"),
            Self::Category(name) => write!(f, "{name}"),
            Self::Date(time) => write!(f, "{}", time.to_rfc3339_opts(SecondsFormat::Secs, true)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
enum PlotPosition {
    Linear { normalized: f64 },
    Slot { start: f64, length: f64 },
}

/// Resolved anchor of one logical value against one axis.
///
/// Positions are stored in normalized units so the same info can be projected
/// onto any virtual rect. Vertical projection grows downward: the top of the
/// domain lands on `rect.y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisPlotInfo {
    position: PlotPosition,
}

impl AxisPlotInfo {
    /// Plot info for continuous axes (numerical, date-time).
    #[must_use]
    pub fn linear(normalized: f64) -> Self {
        Self {
            position: PlotPosition::Linear { normalized },
        }
    }

    /// Plot info for a category slot starting at `start` with `length` width.
    #[must_use]
    pub fn slot(start: f64, length: f64) -> Self {
        Self {
            position: PlotPosition::Slot { start, length },
        }
    }

    fn center_fraction(self) -> f64 {
        match self.position {
            PlotPosition::Linear { normalized } => normalized,
            PlotPosition::Slot { start, length } => start + length / 2.0,
        }
    }

    #[must_use]
    pub fn center_x(self, virtual_rect: Rect) -> f64 {
        virtual_rect.x + self.center_fraction() * virtual_rect.width
    }

    #[must_use]
    pub fn center_y(self, virtual_rect: Rect) -> f64 {
        virtual_rect.y + (1.0 - self.center_fraction()) * virtual_rect.height
    }
}

/// Axis capability consumed by the annotation update pass.
pub trait Axis {
    fn id(&self) -> AxisId;
    fn axis_type(&self) -> AxisType;
    fn is_data_ready(&self) -> bool;
    fn is_updated(&self) -> bool;

    /// Resolves `value` against the current domain, `None` when it can't be
    /// interpreted.
    fn try_resolve(&self, value: &AxisValue) -> Option<AxisPlotInfo>;

    fn is_ready(&self) -> bool {
        self.is_data_ready() && self.is_updated()
    }
}

impl<T: Axis + ?Sized> Axis for Box<T> {
    fn id(&self) -> AxisId {
        (**self).id()
    }

    fn axis_type(&self) -> AxisType {
        (**self).axis_type()
    }

    fn is_data_ready(&self) -> bool {
        (**self).is_data_ready()
    }

    fn is_updated(&self) -> bool {
        (**self).is_updated()
    }

    fn try_resolve(&self, value: &AxisValue) -> Option<AxisPlotInfo> {
        (**self).try_resolve(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AxisKind {
    Numerical(LinearScale),
    Categorical(IndexSet<String>),
    /// Linear scale over unix seconds.
    DateTime(LinearScale),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartAxis {
    id: AxisId,
    axis_type: AxisType,
    kind: AxisKind,
    data_ready: bool,
    updated: bool,
}

impl ChartAxis {
    pub fn numerical(id: AxisId, axis_type: AxisType, min: f64, max: f64) -> ChartResult<Self> {
        Ok(Self::with_kind(
            id,
            axis_type,
            AxisKind::Numerical(LinearScale::new(min, max)?),
        ))
    }

    pub fn date_time(
        id: AxisId,
        axis_type: AxisType,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ChartResult<Self> {
        let scale = LinearScale::new(
            datetime_to_unix_seconds(start),
            datetime_to_unix_seconds(end),
        )?;
        Ok(Self::with_kind(id, axis_type, AxisKind::DateTime(scale)))
    }

    #[must_use]
    pub fn categorical<I, S>(id: AxisId, axis_type: AxisType, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let categories: IndexSet<String> = categories.into_iter().map(Into::into).collect();
        let data_ready = !categories.is_empty();
        let mut axis = Self::with_kind(id, axis_type, AxisKind::Categorical(categories));
        axis.data_ready = data_ready;
        axis
    }

    fn with_kind(id: AxisId, axis_type: AxisType, kind: AxisKind) -> Self {
        Self {
            id,
            axis_type,
            kind,
            data_ready: true,
            updated: true,
        }
    }

    #[must_use]
    pub fn kind(&self) -> &AxisKind {
        &self.kind
    }

    pub fn set_data_ready(&mut self, data_ready: bool) {
        self.data_ready = data_ready;
    }

    /// Completes an axis update; annotations bound to this axis should be
    /// notified afterwards.
    pub fn mark_updated(&mut self) {
        self.updated = true;
    }

    /// Replaces the numeric or date-time range. Leaves the axis not updated.
    pub fn set_range(&mut self, start: f64, end: f64) -> ChartResult<()> {
        let scale = LinearScale::new(start, end)?;
        match &mut self.kind {
            AxisKind::Numerical(current) | AxisKind::DateTime(current) => *current = scale,
            AxisKind::Categorical(_) => {
                return Err(ChartError::InvalidData(format!(
                    "{} is categorical and has no numeric range",
                    self.id
                )));
            }
        }
        self.updated = false;
        Ok(())
    }

    /// Replaces the category set. Leaves the axis not updated.
    pub fn set_categories<I, S>(&mut self, categories: I) -> ChartResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let AxisKind::Categorical(current) = &mut self.kind else {
            return Err(ChartError::InvalidData(format!(
                "{} is not categorical",
                self.id
            )));
        };
        *current = categories.into_iter().map(Into::into).collect();
        self.data_ready = !current.is_empty();
        self.updated = false;
        Ok(())
    }
}

impl Axis for ChartAxis {
    fn id(&self) -> AxisId {
        self.id
    }

    fn axis_type(&self) -> AxisType {
        self.axis_type
    }

    fn is_data_ready(&self) -> bool {
        self.data_ready
    }

    fn is_updated(&self) -> bool {
        self.updated
    }

    fn try_resolve(&self, value: &AxisValue) -> Option<AxisPlotInfo> {
        if !self.data_ready {
            return None;
        }

        match (&self.kind, value) {
            (AxisKind::Numerical(scale), AxisValue::Number(number)) => {
                scale.normalize(*number).ok().map(AxisPlotInfo::linear)
            }
            (AxisKind::Numerical(scale), AxisValue::Decimal(decimal)) => {
                let number = decimal_to_f64(*decimal, "annotation value").ok()?;
                scale.normalize(number).ok().map(AxisPlotInfo::linear)
            }
            (AxisKind::DateTime(scale), AxisValue::Date(time)) => scale
                .normalize(datetime_to_unix_seconds(*time))
                .ok()
                .map(AxisPlotInfo::linear),
            (AxisKind::DateTime(scale), AxisValue::Number(seconds)) => {
                scale.normalize(*seconds).ok().map(AxisPlotInfo::linear)
            }
            (AxisKind::Categorical(categories), AxisValue::Category(name)) => {
                let index = categories.get_index_of(name.as_str())?;
                let length = 1.0 / categories.len() as f64;
                Some(AxisPlotInfo::slot(index as f64 * length, length))
            }
            _ => None,
        }
    }
}
