//! Error types for the interactome engine.
//!
//! Defines the error enums exposed by the public API, their stable codes, and
//! a convenient result alias.

use std::{fmt, io, path::PathBuf, sync::Arc};

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Reasons an interaction file fails validation.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum FormatError {
    /// The file does not exist.
    #[error("file `{}` does not exist", .path.display())]
    MissingFile {
        /// Path that could not be found.
        path: PathBuf,
    },
    /// Reading the source failed for a reason other than a missing file.
    #[error("failed to read line {line}: {kind}")]
    Unreadable {
        /// 1-based line at which reading failed.
        line: usize,
        /// Kind of the underlying I/O failure.
        kind: io::ErrorKind,
    },
    /// The source contained no count line at all.
    #[error("missing interaction count on line 1")]
    MissingCount,
    /// The count line did not parse as a non-negative integer.
    #[error("interaction count `{raw}` is not a non-negative integer")]
    InvalidCount {
        /// Raw text of the count line.
        raw: String,
    },
    /// The declared interaction count was zero.
    #[error("interaction count must be at least 1")]
    ZeroCount,
    /// An interaction line did not contain exactly two tokens.
    #[error("line {line} has {tokens} tokens but an interaction needs exactly 2")]
    MalformedLine {
        /// 1-based line number within the source.
        line: usize,
        /// Number of whitespace-separated tokens found.
        tokens: usize,
    },
    /// The number of interaction lines differs from the declared count.
    #[error("declared {declared} interactions but found {found}")]
    LineCountMismatch {
        /// Count declared on line 1.
        declared: usize,
        /// Number of interaction lines actually present.
        found: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`FormatError`] variants.
    enum FormatErrorCode for FormatError {
        /// The file does not exist.
        MissingFile => MissingFile { .. } => "FORMAT_MISSING_FILE",
        /// Reading the source failed.
        Unreadable => Unreadable { .. } => "FORMAT_UNREADABLE",
        /// The source contained no count line.
        MissingCount => MissingCount => "FORMAT_MISSING_COUNT",
        /// The count line was not a non-negative integer.
        InvalidCount => InvalidCount { .. } => "FORMAT_INVALID_COUNT",
        /// The declared count was zero.
        ZeroCount => ZeroCount => "FORMAT_ZERO_COUNT",
        /// An interaction line was malformed.
        MalformedLine => MalformedLine { .. } => "FORMAT_MALFORMED_LINE",
        /// The interaction line count differed from the declared count.
        LineCountMismatch => LineCountMismatch { .. } => "FORMAT_LINE_COUNT_MISMATCH",
    }
}

/// Error type produced when constructing or querying an [`crate::Interactome`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum InteractomeError {
    /// The source failed validation; no graph was built.
    #[error("`{source_name}` is not a valid interaction description: {error}")]
    InvalidSource {
        /// Identifier of the rejected source.
        source_name: Arc<str>,
        #[source]
        /// Validation failure describing the first offending line.
        error: FormatError,
    },
    /// A query named a vertex that is not part of the graph.
    #[error("vertex `{vertex}` is not part of the interactome")]
    UnknownVertex {
        /// The unknown vertex name.
        vertex: Arc<str>,
    },
    /// The graph is too small for the requested operation.
    #[error("{operation} requires at least {required} vertices but the graph has {vertices}")]
    DegenerateGraph {
        /// Name of the operation that was refused.
        operation: &'static str,
        /// Number of vertices in the graph.
        vertices: usize,
        /// Minimum number of vertices the operation needs.
        required: usize,
    },
    /// A generator probability fell outside `[0, 1]`.
    #[error("edge probability must lie within [0, 1] (got {probability})")]
    InvalidProbability {
        /// The rejected probability.
        probability: f64,
    },
    /// A generator was asked for too few vertices.
    #[error("generator requires at least {minimum} vertices (got {requested})")]
    InvalidVertexCount {
        /// Requested vertex count.
        requested: usize,
        /// Minimum vertex count accepted by the generator.
        minimum: usize,
    },
    /// A degree histogram was requested over more bins than can be listed.
    #[error("degree range {min}..={max} exceeds the limit of {limit} bins")]
    HistogramRangeTooLarge {
        /// Smallest requested degree.
        min: usize,
        /// Largest requested degree.
        max: usize,
        /// Maximum number of bins a histogram may hold.
        limit: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`InteractomeError`] variants.
    enum InteractomeErrorCode for InteractomeError {
        /// The source failed validation.
        InvalidSource => InvalidSource { .. } => "INTERACTOME_INVALID_SOURCE",
        /// A query named an unknown vertex.
        UnknownVertex => UnknownVertex { .. } => "INTERACTOME_UNKNOWN_VERTEX",
        /// The graph is too small for the requested operation.
        DegenerateGraph => DegenerateGraph { .. } => "INTERACTOME_DEGENERATE_GRAPH",
        /// A generator probability fell outside `[0, 1]`.
        InvalidProbability => InvalidProbability { .. } => "INTERACTOME_INVALID_PROBABILITY",
        /// A generator was asked for too few vertices.
        InvalidVertexCount => InvalidVertexCount { .. } => "INTERACTOME_INVALID_VERTEX_COUNT",
        /// A histogram range had too many bins.
        HistogramRangeTooLarge => HistogramRangeTooLarge { .. } => "INTERACTOME_HISTOGRAM_RANGE_TOO_LARGE",
    }
}

impl InteractomeError {
    /// Retrieve the inner [`FormatErrorCode`] when the error originated in validation.
    pub const fn format_code(&self) -> Option<FormatErrorCode> {
        match self {
            Self::InvalidSource { error, .. } => Some(error.code()),
            _ => None,
        }
    }

    pub(crate) fn unknown_vertex(vertex: &str) -> Self {
        Self::UnknownVertex {
            vertex: Arc::from(vertex),
        }
    }
}

/// A Graph Store invariant that failed to hold.
///
/// These indicate a logic error in the engine rather than bad input; a store
/// returned by any public constructor satisfies all of them.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum InvariantViolation {
    /// Vertex list length and matrix dimension disagree.
    #[error("{vertices} vertices but the matrix has dimension {dimension}")]
    DimensionMismatch {
        /// Number of canonical vertices.
        vertices: usize,
        /// Dimension of the adjacency matrix.
        dimension: usize,
    },
    /// Edge list length and matrix upper-triangle population disagree.
    #[error("{edges} interactions but the matrix upper triangle holds {upper_triangle}")]
    EdgeCountMismatch {
        /// Number of interactions in the edge list.
        edges: usize,
        /// Number of set cells above the diagonal.
        upper_triangle: usize,
    },
    /// An interaction joins a vertex to itself.
    #[error("interaction {position} is a self-loop on `{vertex}`")]
    SelfLoop {
        /// Position within the edge list.
        position: usize,
        /// The looping vertex.
        vertex: String,
    },
    /// Two interactions describe the same unordered pair.
    #[error("interaction {position} duplicates the pair `{source_vertex}`-`{target_vertex}`")]
    DuplicateInteraction {
        /// Position of the later duplicate within the edge list.
        position: usize,
        /// First endpoint of the duplicate.
        source_vertex: String,
        /// Second endpoint of the duplicate.
        target_vertex: String,
    },
    /// A vertex is referenced but missing from the canonical vertex list.
    #[error("vertex `{vertex}` is referenced but not in the vertex list")]
    UnlistedVertex {
        /// The unlisted vertex.
        vertex: String,
    },
    /// The matrix is not symmetric.
    #[error("matrix cell ({row}, {column}) differs from its mirror")]
    AsymmetricMatrix {
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        column: usize,
    },
}

/// Convenient alias for results returned by the engine API.
pub type Result<T> = core::result::Result<T, InteractomeError>;
