//! Benchmark functions, one per file

pub mod ackley;
pub mod griewank;
pub mod rastrigin;
pub mod rosenbrock;
pub mod schwefel;
pub mod sphere;
pub mod styblinski_tang2;
pub mod zakharov;

pub use ackley::ackley;
pub use griewank::griewank;
pub use rastrigin::rastrigin;
pub use rosenbrock::rosenbrock;
pub use schwefel::schwefel;
pub use sphere::sphere;
pub use styblinski_tang2::styblinski_tang2;
pub use zakharov::zakharov;
