/*!
# AHU Technical Data Comparison

A browser-based comparison dashboard for air-handling-unit datasheets,
built in Rust.

## Overview

One xlsx workbook (sheet `data`) is loaded at startup into an immutable
in-memory table. The user selects 2-10 units through cascading dropdown
filters; the server assembles a side-by-side report of every datasheet
column for the selected units, renders derived geometry and capacity
charts as PNGs, and offers a CSV export mirroring the on-screen table.

## Architecture

The pipeline is a pure core wrapped by a thin web adapter:

- Column resolution maps logical fields to whichever header spelling the
  loaded dataset revision uses; anything unresolved degrades silently.
- The cascading filter engine narrows each slot's candidate rows step by
  step (year → quarter → region → brand → unit name → recovery type →
  size, plus a conditional type/material step) and exposes the valid
  choices of every step.
- The report assembler walks the physical column order exactly once,
  grouping columns into sections at their trigger columns, dropping
  aggregate-excluded columns, and injecting chart events at five fixed
  anchors.
- Chart data builders reshape narrow column slices into line, scatter and
  grouped-bar series; rendering happens server-side via plotters.
- The exporter replays the same item stream as CSV.

Every render recomputes the whole pipeline from the cached dataset; no
component mutates shared state.

## Modules

- **dataset**: cell values, the loaded table, xlsx ingestion
- **columns**: logical field registry, alias resolution, section triggers
- **filter**: candidate computation and cascading chain evaluation
- **selection**: per-slot results and sentinel lookups
- **report**: exclusion rules and the single-pass report assembler
- **charts**: chart data builders and PNG rendering
- **images**: logo/photo loading and resizing
- **downloader**: CSV export
- **app**: routing and request handlers
*/

pub mod charts;
pub mod columns;
pub mod dataset;
pub mod downloader;
pub mod filter;
pub mod report;
pub mod selection;

#[cfg(feature = "web")]
pub mod app;
#[cfg(feature = "web")]
pub mod images;

/// Re-export everything from these modules to make it easier to use
pub use charts::*;
pub use columns::*;
pub use dataset::*;
pub use downloader::*;
pub use filter::*;
pub use report::*;
pub use selection::*;
