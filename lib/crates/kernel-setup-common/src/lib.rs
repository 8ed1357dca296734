pub mod kernelspec;

pub use kernelspec::{
    CONNECTION_FILE_FLAG, CONNECTION_FILE_TOKEN, DESCRIPTOR_FILE_NAME, KernelDescriptor,
    user_kernel_dir,
};
