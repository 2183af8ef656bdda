fn main() {
    gcl::cli::run();
}
