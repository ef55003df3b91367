/// Domain services
mod result_normalizer;

pub use result_normalizer::ResultNormalizer;
