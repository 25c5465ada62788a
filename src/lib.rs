//! routefix: Next.js async-params migration tool
//!
//! Walks a directory tree for route handler files (`route.ts` by default),
//! detects handlers still declaring the synchronous `params` shape, and
//! rewrites them to the `Promise`-wrapped contract introduced in Next.js 15,
//! inserting the matching `await` binding inside each handler body.

pub mod error;
pub mod report;
pub mod run;
pub mod transform;
pub mod walker;
