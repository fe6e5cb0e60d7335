// Vsm is a batch information-retrieval engine built on the vector-space model.
// Copyright (C) 2024 Yeonwoo Sung
//
// This code is licensed under the GNU Affero General Public License.

//! One module per pipeline stage. Every stage reads its inputs from the files
//! named in its configuration and persists its outputs before returning.

pub mod evaluate;
pub mod indexer;
pub mod inverted_list;
pub mod pipeline;
pub mod query_processor;
pub mod search;
